use {
  common::{alice, bob, MockChain, MockWallet},
  crowdfund_client_sdk::{Error, MessageClass, WalletSession},
  std::sync::atomic::Ordering,
};

mod common;

#[tokio::test]
async fn connect_without_wallet_is_recoverable() {
  let session = WalletSession::<MockWallet>::new(None);

  let error = session.connect().await.unwrap_err();
  assert_eq!(error, Error::WalletUnavailable);
  assert_eq!(error.class(), MessageClass::BlockingAlert);
  assert!(!session.is_connected());
  assert!(session.contract().is_none());
}

#[tokio::test]
async fn connect_binds_first_account() -> anyhow::Result<()> {
  let chain = MockChain::with_campaigns(vec![]);
  let session =
    WalletSession::new(Some(MockWallet::new(chain, vec![alice(), bob()])));

  assert_eq!(session.account(), None);
  assert_eq!(session.connect().await?, alice());
  assert_eq!(session.account(), Some(alice()));
  assert!(session.contract().is_some());

  Ok(())
}

#[tokio::test]
async fn rejection_needs_explicit_reconnect() -> anyhow::Result<()> {
  let chain = MockChain::with_campaigns(vec![]);
  chain.reject_accounts.store(true, Ordering::SeqCst);
  let session =
    WalletSession::new(Some(MockWallet::new(chain.clone(), vec![alice()])));

  assert_eq!(session.connect().await, Err(Error::UserRejected));
  assert!(!session.is_connected());

  // the user changes their mind, nothing happens until connect is
  // called again.
  chain.reject_accounts.store(false, Ordering::SeqCst);
  assert!(!session.is_connected());
  assert_eq!(session.connect().await?, alice());
  assert!(session.is_connected());

  Ok(())
}

#[tokio::test]
async fn wallet_with_no_accounts() {
  let chain = MockChain::with_campaigns(vec![]);
  let session = WalletSession::new(Some(MockWallet::new(chain, vec![])));
  assert!(matches!(session.connect().await, Err(Error::Unknown(_))));
  assert!(!session.is_connected());
}
