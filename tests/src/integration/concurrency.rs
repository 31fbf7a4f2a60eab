//! # Concurrent Submissions
//!
//! The registry is shared across tokio tasks; racing submissions for one
//! user must consume each nonce exactly once.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use authenticator::AuthenticatorApi;
    use shared_types::U256;
    use std::sync::Arc;

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_same_signature_raced_succeeds_once() {
        let registry = local_deployment().service;
        let user = address(USER);
        let sig = Arc::new(signature(USER_SIG_NONCE_0));

        let handles: Vec<_> = (0..32)
            .map(|_| {
                let registry = Arc::clone(&registry);
                let sig = Arc::clone(&sig);
                tokio::spawn(async move { registry.authenticate(&user, &sig).is_ok() })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            if handle.await.unwrap() {
                successes += 1;
            }
        }

        assert_eq!(successes, 1);
        assert_eq!(registry.get_nonce(&user), U256::one());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_many_users_in_parallel() {
        let registry = local_deployment().service;
        let users: Vec<_> = (0..64).map(|_| random_user()).collect();

        let handles: Vec<_> = users
            .iter()
            .map(|(key, user)| {
                let registry = Arc::clone(&registry);
                let sig = sign(key, registry.domain(), user, 0);
                let user = *user;
                tokio::spawn(async move { registry.authenticate(&user, &sig) })
            })
            .collect();

        for handle in handles {
            assert!(handle.await.unwrap().is_ok());
        }
        for (_, user) in &users {
            assert!(registry.is_authenticated(user));
            assert_eq!(registry.get_nonce(user), U256::one());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_sequential_nonces_under_contention() {
        let registry = local_deployment().service;
        let (key, user) = random_user();
        let signatures: Vec<_> = (0..10u64)
            .map(|n| sign(&key, registry.domain(), &user, n))
            .collect();

        // Every task retries its signature until its nonce comes up
        let handles: Vec<_> = signatures
            .into_iter()
            .map(|sig| {
                let registry = Arc::clone(&registry);
                tokio::spawn(async move {
                    loop {
                        if registry.authenticate(&user, &sig).is_ok() {
                            return;
                        }
                        tokio::task::yield_now().await;
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(registry.get_nonce(&user), U256::from(10));
    }
}
