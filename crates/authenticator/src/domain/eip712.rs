//! # EIP-712 Typed-Data Hashing
//!
//! Builds the digest a user signs with `eth_signTypedData_v4`:
//!
//! ```text
//! digest = keccak256(0x19 || 0x01 || domainSeparator || hashStruct(message))
//! ```
//!
//! The domain binds every signature to one registry instance on one chain.

use super::ecdsa::keccak256;
use super::entities::AuthenticateMessage;
use shared_types::{Address, ChainId, Hash, U256};

/// Signing domain name.
pub const DOMAIN_NAME: &str = "Authenticator";

/// Signing domain version.
pub const DOMAIN_VERSION: &str = "1";

/// Canonical encoding of the domain type.
pub const DOMAIN_TYPE: &str =
    "EIP712Domain(string name,string version,uint256 chainId,address verifyingContract)";

/// Canonical encoding of the message type.
pub const AUTHENTICATE_TYPE: &str = "Authenticate(address user,uint256 nonce)";

/// Prefix bytes for a typed-data digest.
const TYPED_DATA_PREFIX: [u8; 2] = [0x19, 0x01];

/// Left-pad an address into a 32-byte ABI word.
fn encode_address(address: &Address) -> [u8; 32] {
    let mut word = [0u8; 32];
    word[12..].copy_from_slice(address);
    word
}

/// Big-endian 32-byte ABI word.
fn encode_uint(value: U256) -> [u8; 32] {
    let mut word = [0u8; 32];
    value.to_big_endian(&mut word);
    word
}

/// Identity of one registry instance on one chain.
///
/// The separator is computed once at construction; it depends only on
/// values fixed at deployment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DomainDescriptor {
    chain_id: ChainId,
    verifying_contract: Address,
    separator: Hash,
}

impl DomainDescriptor {
    pub fn new(chain_id: ChainId, verifying_contract: Address) -> Self {
        let separator = compute_domain_separator(chain_id, &verifying_contract);
        Self {
            chain_id,
            verifying_contract,
            separator,
        }
    }

    pub fn name(&self) -> &'static str {
        DOMAIN_NAME
    }

    pub fn version(&self) -> &'static str {
        DOMAIN_VERSION
    }

    pub fn chain_id(&self) -> ChainId {
        self.chain_id
    }

    pub fn verifying_contract(&self) -> Address {
        self.verifying_contract
    }

    pub fn domain_separator(&self) -> Hash {
        self.separator
    }

    /// Digest of `Authenticate(user, nonce)` under this domain.
    pub fn authenticate_digest(&self, user: &Address, nonce: U256) -> Hash {
        let message = AuthenticateMessage { user: *user, nonce };
        typed_data_digest(&self.separator, &message.struct_hash())
    }
}

impl AuthenticateMessage {
    /// `hashStruct(Authenticate)`.
    pub fn struct_hash(&self) -> Hash {
        let mut encoded = [0u8; 96];
        encoded[..32].copy_from_slice(&keccak256(AUTHENTICATE_TYPE.as_bytes()));
        encoded[32..64].copy_from_slice(&encode_address(&self.user));
        encoded[64..].copy_from_slice(&encode_uint(self.nonce));
        keccak256(&encoded)
    }
}

fn compute_domain_separator(chain_id: ChainId, verifying_contract: &Address) -> Hash {
    let mut encoded = [0u8; 160];
    encoded[..32].copy_from_slice(&keccak256(DOMAIN_TYPE.as_bytes()));
    encoded[32..64].copy_from_slice(&keccak256(DOMAIN_NAME.as_bytes()));
    encoded[64..96].copy_from_slice(&keccak256(DOMAIN_VERSION.as_bytes()));
    encoded[96..128].copy_from_slice(&encode_uint(chain_id.as_u256()));
    encoded[128..].copy_from_slice(&encode_address(verifying_contract));
    keccak256(&encoded)
}

/// `keccak256(0x19 || 0x01 || domain_separator || struct_hash)`.
pub fn typed_data_digest(domain_separator: &Hash, struct_hash: &Hash) -> Hash {
    let mut encoded = [0u8; 66];
    encoded[..2].copy_from_slice(&TYPED_DATA_PREFIX);
    encoded[2..34].copy_from_slice(domain_separator);
    encoded[34..].copy_from_slice(struct_hash);
    keccak256(&encoded)
}
