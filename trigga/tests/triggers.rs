//! Free-standing and bound trigger behavior.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use trigga::testing::{CountingListener, FailingListener, RecordingListener};
use trigga::{BoxError, DispatchError, Trigger};

#[derive(Clone, Debug, PartialEq)]
struct Sentinel;

impl trigga::Payload for Sentinel {}

#[tokio::test]
async fn identity_trigger_notifies_capture_listeners() {
    let identity = Trigger::new(|value: Sentinel| async move { Ok::<_, BoxError>(value) });
    let capture = RecordingListener::new();
    identity.hook(capture.clone());

    let returned = identity.fire(Sentinel).await.unwrap();

    assert_eq!(returned, Sentinel);
    assert_eq!(capture.received(), vec![Sentinel]);
}

#[tokio::test]
async fn tuple_payloads_deliver_both_values() {
    let split = Trigger::new(|text: String| async move {
        let len = text.len();
        Ok::<_, BoxError>((len, text))
    });

    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    split.hook(move |(len, text): (usize, String)| {
        let sink = Arc::clone(&sink);
        async move {
            sink.lock().unwrap().push((len, text));
            Ok::<_, BoxError>(())
        }
    });

    let (len, text) = split.fire("abc".to_string()).await.unwrap();

    assert_eq!((len, text.as_str()), (3, "abc"));
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[(3, "abc".to_string())]
    );
}

#[tokio::test]
async fn wrapped_function_completes_before_listeners_run() {
    let order = Arc::new(Mutex::new(Vec::new()));

    let trigger_log = Arc::clone(&order);
    let trigger = Trigger::new(move |(): ()| {
        let log = Arc::clone(&trigger_log);
        async move {
            tokio::task::yield_now().await;
            log.lock().unwrap().push("trigger");
            Ok::<_, BoxError>(())
        }
    });

    let listener_log = Arc::clone(&order);
    trigger.hook(move |(): ()| {
        let log = Arc::clone(&listener_log);
        async move {
            log.lock().unwrap().push("listener");
            Ok::<_, BoxError>(())
        }
    });

    trigger.fire(()).await.unwrap();

    assert_eq!(*order.lock().unwrap(), vec!["trigger", "listener"]);
}

struct Counter {
    step: u32,
}

#[tokio::test]
async fn class_listeners_fire_for_every_instance() {
    let bump = Trigger::from_method(|counter: Arc<Counter>, base: u32| async move {
        Ok::<_, BoxError>(base + counter.step)
    });

    let class_count = CountingListener::new();
    bump.hook(class_count.clone());

    let a = Arc::new(Counter { step: 1 });
    let b = Arc::new(Counter { step: 2 });

    assert_eq!(bump.bind(&a).fire(10).await.unwrap(), 11);
    assert_eq!(bump.bind(&b).fire(10).await.unwrap(), 12);

    assert_eq!(class_count.count(), 2);
}

#[tokio::test]
async fn instance_listeners_never_fire_for_other_instances() {
    let bump = Trigger::from_method(|counter: Arc<Counter>, base: u32| async move {
        Ok::<_, BoxError>(base + counter.step)
    });

    let a = Arc::new(Counter { step: 1 });
    let b = Arc::new(Counter { step: 2 });

    let a_only = CountingListener::new();
    bump.bind(&a).hook(a_only.clone());
    let b_only = CountingListener::new();
    bump.hook_scoped(&b, b_only.clone());

    bump.bind(&b).fire(0).await.unwrap();
    assert_eq!(a_only.count(), 0);
    assert_eq!(b_only.count(), 1);

    bump.bind(&a).fire(0).await.unwrap();
    assert_eq!(a_only.count(), 1);
    assert_eq!(b_only.count(), 1);
}

#[tokio::test]
async fn existing_views_observe_later_registrations() {
    let bump = Trigger::from_method(|counter: Arc<Counter>, base: u32| async move {
        Ok::<_, BoxError>(base + counter.step)
    });
    let a = Arc::new(Counter { step: 1 });

    let view = bump.bind(&a);
    let late = CountingListener::new();
    bump.bind(&a).hook(late.clone());

    view.fire(0).await.unwrap();
    assert_eq!(late.count(), 1);
}

#[tokio::test]
async fn trigger_failure_skips_listeners() {
    let failing =
        Trigger::new(|(): ()| async move { Err::<u32, BoxError>("wrapped function failed".into()) });
    let count = CountingListener::new();
    failing.hook(count.clone());

    let err = failing.fire(()).await.unwrap_err();

    assert!(matches!(err, DispatchError::Trigger(_)));
    assert_eq!(count.count(), 0);
}

#[tokio::test]
async fn listener_failure_cancels_slow_siblings() {
    let ping = Trigger::new(|(): ()| async move { Ok::<_, BoxError>(0u32) });

    ping.hook(FailingListener::new("listener rejected the payload"));

    let finished = Arc::new(Mutex::new(false));
    let flag = Arc::clone(&finished);
    ping.hook(move |_payload: u32| {
        let flag = Arc::clone(&flag);
        async move {
            tokio::time::sleep(Duration::from_secs(5)).await;
            *flag.lock().unwrap() = true;
            Ok::<_, BoxError>(())
        }
    });

    let err = ping.fire(()).await.unwrap_err();

    assert!(matches!(err, DispatchError::Listener(_)));
    assert!(!*finished.lock().unwrap());
}
