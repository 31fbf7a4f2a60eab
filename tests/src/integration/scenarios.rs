//! # Relayed Authentication Scenarios
//!
//! A relayer submits a user's offline signature to a freshly deployed local
//! registry. Signatures are fixed wallet outputs, so these tests also pin the
//! typed-data encoding to what external signers produce.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use authenticator::{AuthenticatorApi, AuthenticatorError};
    use shared_types::U256;

    #[test]
    fn test_deployment_lands_at_wallet_registry_address() {
        let deployment = local_deployment();
        assert_eq!(
            deployment.record.registry_address,
            address(LOCAL_REGISTRY)
        );
        assert_eq!(deployment.record.deployer, address(RELAYER));
    }

    #[test]
    fn test_fresh_registry_defaults() {
        let registry = local_deployment().service;
        let user = address(USER);
        let relayer = address(RELAYER);

        assert!(!registry.is_authenticated(&user));
        assert!(!registry.is_authenticated(&relayer));
        assert_eq!(registry.get_nonce(&user), U256::zero());
        assert_eq!(registry.get_nonce(&relayer), U256::zero());
    }

    #[test]
    fn test_relayer_submits_user_signature() {
        let registry = local_deployment().service;
        let user = address(USER);

        let receipt = registry
            .authenticate(&user, &signature(USER_SIG_NONCE_0))
            .unwrap();

        assert_eq!(receipt.event.user, user);
        assert_eq!(receipt.event.registry, address(LOCAL_REGISTRY));
        assert!(registry.is_authenticated(&user));
        assert_eq!(registry.get_nonce(&user), U256::one());
        // Submitting on someone's behalf does not authenticate the relayer
        assert!(!registry.is_authenticated(&address(RELAYER)));
    }

    #[test]
    fn test_relayer_cannot_sign_for_user() {
        let registry = local_deployment().service;
        let user = address(USER);

        let result = registry.authenticate(&user, &signature(RELAYER_SIG_FOR_USER_NONCE_0));

        assert_eq!(result, Err(AuthenticatorError::InvalidSignature));
        assert!(!registry.is_authenticated(&user));
        assert_eq!(registry.get_nonce(&user), U256::zero());
    }

    #[test]
    fn test_resubmission_is_rejected() {
        let registry = local_deployment().service;
        let user = address(USER);
        registry
            .authenticate(&user, &signature(USER_SIG_NONCE_0))
            .unwrap();

        let replay = registry.authenticate(&user, &signature(USER_SIG_NONCE_0));

        assert_eq!(replay, Err(AuthenticatorError::InvalidSignature));
        assert_eq!(registry.get_nonce(&user), U256::one());
    }

    #[test]
    fn test_second_authentication_with_next_nonce() {
        let registry = local_deployment().service;
        let user = address(USER);
        registry
            .authenticate(&user, &signature(USER_SIG_NONCE_0))
            .unwrap();

        let receipt = registry
            .authenticate(&user, &signature(USER_SIG_NONCE_1))
            .unwrap();

        assert_eq!(receipt.event.nonce, U256::one());
        assert_eq!(registry.get_nonce(&user), U256::from(2));
        assert!(registry.is_authenticated(&user));
        assert!(registry.authenticated(&user));
    }

    #[test]
    fn test_next_nonce_signature_rejected_early() {
        let registry = local_deployment().service;
        let user = address(USER);

        let result = registry.authenticate(&user, &signature(USER_SIG_NONCE_1));

        assert_eq!(result, Err(AuthenticatorError::InvalidSignature));
        assert_eq!(registry.get_nonce(&user), U256::zero());
    }

    #[test]
    fn test_locally_signed_matches_fixture() {
        let deployment = local_deployment();
        let user = address(USER);

        let signed = sign(&signing_key(USER_KEY), deployment.service.domain(), &user, 0);

        assert_eq!(signed, signature(USER_SIG_NONCE_0));
    }

    #[test]
    fn test_registries_do_not_share_state() {
        let first = local_deployment().service;
        let second = local_deployment().service;
        let user = address(USER);

        first
            .authenticate(&user, &signature(USER_SIG_NONCE_0))
            .unwrap();

        assert!(!second.is_authenticated(&user));
        // Same chain and address, so the signature is still valid there
        assert!(second
            .authenticate(&user, &signature(USER_SIG_NONCE_0))
            .is_ok());
    }
}
