use googletest::prelude::*;
use nix::errno::Errno;
use serial_test::serial;

use courier_testing::fixtures::{tarpit, TARPIT_HOST};
use courier_testing::gate::requires_network;
use courier_testing::{init_logging, RunnableTest, TestCase, TestOutcome};

use crate::testing::FakeClient;

fn connect_to_tarpit(errno: Errno) -> TestCase<impl FnOnce() -> std::io::Result<()>> {
    TestCase::new("test_connect_to_tarpit", move || {
        FakeClient::failing_with(errno as i32).connect(tarpit(80))
    })
}

#[test]
#[serial]
fn should_skip_when_network_is_unreachable() {
    init_logging();

    let outcome = requires_network(connect_to_tarpit(Errno::ENETUNREACH)).run();

    assert_that!(outcome.skip_reason(), some(contains_substring("test_connect_to_tarpit")));
}

#[test]
#[serial]
fn should_skip_when_host_is_unreachable() {
    init_logging();

    let outcome = requires_network(connect_to_tarpit(Errno::EHOSTUNREACH)).run();

    assert_that!(outcome.is_skipped(), eq(true));
}

#[test]
#[serial]
fn should_propagate_refused_connection_with_its_code() {
    init_logging();

    let outcome = requires_network(connect_to_tarpit(Errno::ECONNREFUSED)).run();

    match outcome {
        TestOutcome::Failed(error) => assert_that!(error.raw_os_error(), some(eq(Errno::ECONNREFUSED as i32))),
        other => panic!("expected the refused connection to fail the test, got {other:?}"),
    }
}

#[test]
#[serial]
fn should_skip_when_retries_ran_into_unreachable_network() -> anyhow::Result<()> {
    init_logging();
    let client = FakeClient::failing_with(Errno::ENETUNREACH as i32);

    let test = TestCase::new("test_get_from_tarpit", || {
        Ok::<_, anyhow::Error>(client.get(&format!("http://{TARPIT_HOST}/"))?)
    });

    let status = requires_network(test).run().into_result()?;

    assert_that!(status, none());
    Ok(())
}

#[test]
#[serial]
fn should_fail_when_retries_ran_into_refused_connection() {
    init_logging();
    let client = FakeClient::failing_with(Errno::ECONNREFUSED as i32);

    let test = TestCase::new("test_get_from_tarpit", || client.get(&format!("http://{TARPIT_HOST}/")));

    let result = requires_network(test).run().into_result();

    let error = result.err();
    assert_that!(error.as_ref().map(ToString::to_string), some(eq("Max retries exceeded with url: http://10.255.255.1/")));
    assert_that!(error.as_ref().and_then(|error| error.reason()).and_then(std::io::Error::raw_os_error), some(eq(Errno::ECONNREFUSED as i32)));
}

#[test]
#[serial]
fn should_return_response_when_network_is_reachable() {
    init_logging();
    let client = FakeClient::default();

    let outcome = requires_network(TestCase::new("test_get", || client.get("http://localhost/"))).run();

    assert_that!(outcome.into_result().ok(), some(some(eq(200))));
}

#[test]
#[serial]
fn should_skip_on_unreachable_code_configured_through_environment() {
    init_logging();
    let client = FakeClient::failing_with(Errno::ETIMEDOUT as i32);

    std::env::set_var("COURIER_TESTING_REACHABILITY_CODES", (Errno::ETIMEDOUT as i32).to_string());
    let test = requires_network(TestCase::new("test_get_from_tarpit", || client.get(&format!("http://{TARPIT_HOST}/"))));
    std::env::remove_var("COURIER_TESTING_REACHABILITY_CODES");

    assert_that!(test.run().skip_reason(), some(eq("Can't run test_get_from_tarpit because the network is unreachable")));
}
