/// Generates a `build_info` module with information collected at build time.
///
/// Has to be called in the `lib.rs` of a crate whose `build.rs` runs `shadow_rs::new()`.
#[macro_export]
macro_rules! build_info {
    () => {
        shadow_rs::shadow!(__build_info);

        pub mod build_info {
            use super::__build_info;

            pub const RUST_VERSION: &'static str = __build_info::RUST_VERSION;
        }
    }
}
