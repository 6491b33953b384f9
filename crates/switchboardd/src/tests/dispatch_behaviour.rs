//! Behavioural tests for action dispatch.

use std::cell::RefCell;
use std::sync::Arc;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use super::support::test_config;
use crate::dispatch::{Dispatcher, NOT_IMPLEMENTED_BODY, Request, Response};
use crate::envelope::{Envelope, JSON_CONTENT_TYPE};

pub struct DispatchWorld {
    dispatcher: Option<Dispatcher>,
    responses: Vec<Response>,
}

impl DispatchWorld {
    fn dispatch(&mut self, request: &Request) {
        let dispatcher = self.dispatcher.as_ref().expect("dispatcher configured");
        self.responses.push(dispatcher.dispatch(request));
    }

    fn last(&self) -> &Response {
        self.responses.last().expect("a response was recorded")
    }

    fn envelope(&self) -> Envelope {
        serde_json::from_slice(self.last().body()).expect("envelope body")
    }
}

#[fixture]
fn world() -> RefCell<DispatchWorld> {
    RefCell::new(DispatchWorld {
        dispatcher: None,
        responses: Vec::new(),
    })
}

#[given("a dispatcher over the test configuration")]
fn given_dispatcher(world: &RefCell<DispatchWorld>) {
    world.borrow_mut().dispatcher = Some(Dispatcher::new(Arc::new(test_config())));
}

#[when("a request with action {action} is dispatched")]
fn when_action_dispatched(world: &RefCell<DispatchWorld>, action: String) {
    world.borrow_mut().dispatch(&Request::for_action(action));
}

#[when("a request with an empty action is dispatched")]
fn when_empty_action_dispatched(world: &RefCell<DispatchWorld>) {
    world.borrow_mut().dispatch(&Request::for_action(""));
}

#[when("a request without an action is dispatched")]
fn when_no_action_dispatched(world: &RefCell<DispatchWorld>) {
    world
        .borrow_mut()
        .dispatch(&Request::new().with_param("message", "orphan"));
}

#[then("the response is JSON")]
fn then_json(world: &RefCell<DispatchWorld>) {
    assert_eq!(world.borrow().last().content_type(), Some(JSON_CONTENT_TYPE));
}

#[then("the envelope reports success")]
fn then_success(world: &RefCell<DispatchWorld>) {
    assert_eq!(world.borrow().envelope(), Envelope::succeeded());
}

#[then("the envelope reports a failure mentioning {word}")]
fn then_failure(world: &RefCell<DispatchWorld>, word: String) {
    let envelope = world.borrow().envelope();
    assert!(!envelope.success);
    assert!(envelope.reason.contains(&word), "{}", envelope.reason);
}

#[then("the response is the not-implemented diagnostic")]
fn then_not_implemented(world: &RefCell<DispatchWorld>) {
    let world = world.borrow();
    let response = world.last();
    assert_eq!(response.content_type(), Some("text/x-test-error"));
    assert_eq!(response.body(), NOT_IMPLEMENTED_BODY.as_bytes());
}

#[then("both responses are identical")]
fn then_identical(world: &RefCell<DispatchWorld>) {
    let world = world.borrow();
    let [first, second] = world.responses.as_slice() else {
        panic!("expected two responses, got {}", world.responses.len());
    };
    assert_eq!(first, second);
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Registered no-op action succeeds"
)]
fn no_op_succeeds(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Unregistered actions fall back deterministically"
)]
fn unknown_falls_back(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Empty and missing actions fall back"
)]
fn empty_and_missing_fall_back(world: RefCell<DispatchWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/dispatch.feature",
    name = "Handler failures are reported inside the envelope"
)]
fn handler_failures_in_envelope(world: RefCell<DispatchWorld>) {
    drop(world);
}
