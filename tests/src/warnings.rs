use googletest::prelude::*;
use serial_test::serial;

use courier_testing::{init_logging, isolate_warnings, setup_suite, CatchAllWarnings};
use courier_warnings::category::{HTTP_WARNING, INSECURE_REQUEST_WARNING};
use courier_warnings::{catch_warnings, filters, Action, Filter, Warning};

use crate::testing::FakeClient;

fn insecure_client() -> FakeClient {
    FakeClient {
        verify_certificates: false,
        ..FakeClient::default()
    }
}

#[test]
#[serial]
fn should_ignore_client_warnings_after_suite_setup() {
    init_logging();
    setup_suite();
    let client = insecure_client();

    let caught = catch_warnings(true);
    let _ = client.get("https://localhost/");

    assert_that!(caught.recorded(), empty());
    assert_that!(filters(), contains(eq(Filter::new(Action::Ignore, HTTP_WARNING))));
}

#[test]
#[serial]
fn should_record_every_request_inside_isolation_scope() {
    init_logging();
    setup_suite();
    let client = insecure_client();
    for _ in 0..2 {
        let _ = client.get("https://localhost/");
    }
    let registry_before = client.ssl_module.registry();
    let filters_before = filters();

    let recorded = isolate_warnings([&client.ssl_module], |scope| {
        for _ in 0..3 {
            let _ = client.get("https://localhost/");
        }
        scope.recorded()
    });

    assert_that!(recorded, len(eq(3)));
    assert_that!(recorded, each(field!(Warning.category, eq(INSECURE_REQUEST_WARNING))));
    assert_that!(recorded, each(field!(Warning.module, eq("courier::util::ssl"))));
    assert_that!(client.ssl_module.registry(), eq(registry_before));
    assert_that!(filters(), eq(filters_before));
}

#[test]
#[serial]
fn should_restore_state_when_test_body_fails() {
    init_logging();
    setup_suite();
    let client = insecure_client();
    let _ = client.get("https://localhost/");
    let registry_before = client.ssl_module.registry();

    let failing_test = || -> anyhow::Result<()> {
        let scope = CatchAllWarnings::enter([&client.ssl_module]);
        let _ = client.get("https://localhost/");
        anyhow::ensure!(scope.recorded().is_empty(), "expected no warnings, got {}", scope.recorded().len());
        Ok(())
    };

    assert_that!(failing_test(), err(displays_as(eq("expected no warnings, got 1"))));
    assert_that!(client.ssl_module.registry(), eq(registry_before));
}
