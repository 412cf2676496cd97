//! Named trigger groups: forward hooks, duplicate declarations, scoping.

use lazy_static::lazy_static;
use std::sync::Arc;
use trigga::testing::{CountingListener, RecordingListener};
use trigga::{BoxError, DeclareError, HookError, Hooked, LookupError, TriggerGroup};

#[tokio::test]
async fn declares_and_fires_named_triggers() {
    let group: TriggerGroup<()> = TriggerGroup::new();
    let echo = group
        .declare_free("echo", |text: String| async move { Ok::<_, BoxError>(text) })
        .unwrap();

    let capture = RecordingListener::new();
    group.hook_by_name::<String, _>("echo", capture.clone()).unwrap();

    assert!(group.contains("echo"));
    assert_eq!(echo.fire("hello".to_string()).await.unwrap(), "hello");
    assert_eq!(capture.received(), vec!["hello".to_string()]);
}

#[tokio::test]
async fn forward_hooks_fire_after_declaration() {
    let group: TriggerGroup<()> = TriggerGroup::new();

    let capture = RecordingListener::new();
    group.hook_by_name::<u32, _>("later", capture.clone()).unwrap();

    assert!(group.contains("later"));
    assert!(matches!(
        group.get::<u32, u32>("later"),
        Err(LookupError::NotYetDeclared(_))
    ));

    let later = group
        .declare_free("later", |n: u32| async move { Ok::<_, BoxError>(n * 2) })
        .unwrap();

    assert_eq!(later.fire(21).await.unwrap(), 42);
    assert_eq!(capture.received(), vec![42]);
}

#[tokio::test]
async fn duplicate_declarations_are_rejected_and_keep_listeners() {
    let group: TriggerGroup<()> = TriggerGroup::new();
    let first = group
        .declare_free("ident", |n: u32| async move { Ok::<_, BoxError>(n) })
        .unwrap();

    let count = CountingListener::new();
    group.hook_by_name::<u32, _>("ident", count.clone()).unwrap();

    let err = group
        .declare_free("ident", |n: u32| async move { Ok::<_, BoxError>(n + 1) })
        .unwrap_err();
    assert!(matches!(err, DeclareError::AlreadyDefined(_)));

    assert_eq!(first.fire(7).await.unwrap(), 7);
    assert_eq!(count.count(), 1);
}

#[tokio::test]
async fn forward_hook_payload_types_are_enforced_at_declaration() {
    let group: TriggerGroup<()> = TriggerGroup::new();
    group
        .hook_by_name::<String, _>("misfit", CountingListener::new())
        .unwrap();

    let err = group
        .declare_free("misfit", |n: u32| async move { Ok::<_, BoxError>(n) })
        .unwrap_err();
    assert!(matches!(err, DeclareError::PayloadMismatch { .. }));
}

#[tokio::test]
async fn lookups_check_the_requested_types() {
    let group: TriggerGroup<()> = TriggerGroup::new();
    group
        .declare_free("echo", |text: String| async move { Ok::<_, BoxError>(text) })
        .unwrap();

    assert!(matches!(
        group.get::<u32, u32>("echo"),
        Err(LookupError::WrongType { .. })
    ));
    assert!(matches!(
        group.get::<String, String>("missing"),
        Err(LookupError::Unknown(_))
    ));
}

struct Sample;

lazy_static! {
    static ref SAMPLE_HOOKS: TriggerGroup<Sample> = {
        let group = TriggerGroup::new();
        group
            .declare("ident", |_sample: Arc<Sample>, value: u32| async move {
                Ok::<_, BoxError>(value)
            })
            .expect("fresh group");
        group
    };
}

impl Hooked for Sample {
    fn hooks() -> &'static TriggerGroup<Sample> {
        &SAMPLE_HOOKS
    }
}

#[tokio::test]
async fn bound_group_hooks_scope_to_their_instance() {
    let a = Arc::new(Sample);
    let b = Arc::new(Sample);

    let a_capture = RecordingListener::new();
    a.clone().hook::<u32, _>("ident", a_capture.clone()).unwrap();

    let via_b = b.clone().triggers().trigger::<u32, u32>("ident").unwrap();
    assert_eq!(via_b.fire(5).await.unwrap(), 5);
    assert_eq!(a_capture.count(), 0);

    let via_a = a.clone().triggers().trigger::<u32, u32>("ident").unwrap();
    assert_eq!(via_a.fire(6).await.unwrap(), 6);
    assert_eq!(a_capture.received(), vec![6]);
}

#[tokio::test]
async fn group_level_hooks_fire_for_every_instance() {
    let broadcast = Sample::hooks()
        .declare("broadcast", |_sample: Arc<Sample>, value: u32| async move {
            Ok::<_, BoxError>(value)
        })
        .unwrap();

    let count = CountingListener::new();
    Sample::hooks()
        .hook_by_name::<u32, _>("broadcast", count.clone())
        .unwrap();

    let a = Arc::new(Sample);
    let b = Arc::new(Sample);

    broadcast.bind(&a).fire(1).await.unwrap();
    b.clone()
        .triggers()
        .trigger::<u32, u32>("broadcast")
        .unwrap()
        .fire(2)
        .await
        .unwrap();

    assert_eq!(count.count(), 2);
}

#[tokio::test]
async fn scoped_hooks_on_placeholders_are_rejected() {
    let group: TriggerGroup<Sample> = TriggerGroup::new();
    let a = Arc::new(Sample);

    let err = group
        .hook_by_name_scoped::<u32, _>("ghost", &a, CountingListener::new())
        .unwrap_err();
    assert!(matches!(err, HookError::ScopedOnPlaceholder(_)));
}

#[tokio::test]
async fn bound_groups_default_hooks_to_their_own_instance() {
    let group: TriggerGroup<Sample> = TriggerGroup::new();
    group
        .declare("ping", |_sample: Arc<Sample>, value: u32| async move {
            Ok::<_, BoxError>(value)
        })
        .unwrap();

    let a = Arc::new(Sample);
    let b = Arc::new(Sample);

    let a_count = CountingListener::new();
    group
        .bind(&a)
        .hook_by_name::<u32, _>("ping", a_count.clone())
        .unwrap();

    group
        .bind(&b)
        .trigger::<u32, u32>("ping")
        .unwrap()
        .fire(0)
        .await
        .unwrap();
    assert_eq!(a_count.count(), 0);

    group
        .bind(&a)
        .trigger::<u32, u32>("ping")
        .unwrap()
        .fire(0)
        .await
        .unwrap();
    assert_eq!(a_count.count(), 1);
}
