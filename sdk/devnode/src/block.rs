use {
  crowdfund_client_sdk::provider::CreateCampaign,
  crowdfund_primitives::{Address, Amount, CampaignId, TxHash},
  multihash::{Hasher, Sha3_256},
  serde::{Deserialize, Serialize},
};

/// A contract call as recorded on chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Call {
  CreateCampaign {
    owner: Address,
    title: String,
    description: String,
    target: Amount,
    deadline: u64,
    image: String,
  },
  DonateToCampaign {
    id: CampaignId,
  },
}

impl From<CreateCampaign> for Call {
  fn from(call: CreateCampaign) -> Self {
    Call::CreateCampaign {
      owner: call.owner,
      title: call.title,
      description: call.description,
      target: call.target,
      deadline: call.deadline,
      image: call.image,
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
  pub sender: Address,

  /// Chain-wide submission counter, makes otherwise identical
  /// calls hash differently.
  pub nonce: u64,

  /// Coins sent along with the call.
  pub value: Amount,

  pub call: Call,
}

impl Transaction {
  /// SHA3-256 of the transaction's msgpack encoding.
  pub fn hash(&self) -> Result<TxHash, rmp_serde::encode::Error> {
    let mut hasher = Sha3_256::default();
    hasher.update(&rmp_serde::to_vec(self)?);
    let mut digest = [0u8; 32];
    digest.copy_from_slice(hasher.finalize());
    Ok(TxHash::new(digest))
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Block {
  pub height: u64,

  /// Unix seconds, the "now" contract rules are evaluated against.
  pub timestamp: u64,

  pub transactions: Vec<Transaction>,
}

impl Block {
  pub fn genesis(timestamp: u64) -> Self {
    Self {
      height: 0,
      timestamp,
      transactions: vec![],
    }
  }
}
