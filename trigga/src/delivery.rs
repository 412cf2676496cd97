//! Concurrent fan-out/join delivery.

use futures::future::try_join_all;
use trigga_core::{Delivery, DispatchError, Payload, SharedListener};

/// The concurrent delivery strategy.
///
/// Every listener in the snapshot is polled concurrently; `deliver` resolves
/// only once all of them complete. The first listener error resolves the join
/// early, dropping — and thereby cancelling — the still-running siblings
/// before the error is reported.
#[derive(Debug, Default, Clone, Copy)]
pub struct FanoutDelivery;

impl Delivery for FanoutDelivery {
    async fn deliver<'a, P: Payload>(
        &'a self,
        payload: &'a P,
        listeners: &'a [SharedListener<P>],
    ) -> Result<(), DispatchError> {
        if listeners.is_empty() {
            return Ok(());
        }
        try_join_all(
            listeners
                .iter()
                .map(|listener| listener.on_fire_dyn(payload.clone())),
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{CountingListener, FailingListener};
    use std::sync::Arc;

    #[tokio::test]
    async fn delivers_to_every_listener() {
        let count = CountingListener::new();
        let listeners: Vec<SharedListener<u32>> =
            vec![Arc::new(count.clone()), Arc::new(count.clone())];

        FanoutDelivery.deliver(&7u32, &listeners).await.unwrap();
        assert_eq!(count.count(), 2);
    }

    #[tokio::test]
    async fn surfaces_listener_errors() {
        let listeners: Vec<SharedListener<u32>> =
            vec![Arc::new(FailingListener::new("listener rejected the payload"))];

        let err = FanoutDelivery.deliver(&7u32, &listeners).await.unwrap_err();
        assert!(matches!(err, DispatchError::Listener(_)));
    }

    #[tokio::test]
    async fn empty_sets_are_a_no_op() {
        let listeners: Vec<SharedListener<u32>> = Vec::new();
        FanoutDelivery.deliver(&7u32, &listeners).await.unwrap();
    }
}
