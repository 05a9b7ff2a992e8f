fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new() //collect build information for use at runtime
}
