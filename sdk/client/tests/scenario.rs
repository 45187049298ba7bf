use {
  common::{alice, campaign, MockChain, MockWallet, DAY, NOW},
  crowdfund_client_sdk::{
    primitives::Amount,
    provider::ProviderError,
    CampaignForm,
    Config,
    Dashboard,
    Error,
    FixedClock,
    MessageClass,
    ViewState,
  },
  std::sync::Arc,
};

mod common;

fn dashboard(chain: Arc<MockChain>) -> Dashboard<MockWallet> {
  Dashboard::with_clock(
    Some(MockWallet::new(chain, vec![alice()])),
    Config::default(),
    Arc::new(FixedClock::new(NOW)),
  )
}

#[tokio::test]
async fn donation_completes_a_campaign() -> anyhow::Result<()> {
  let chain = MockChain::with_campaigns(vec![campaign(
    0,
    Amount::from_whole(1000),
    Amount::from_whole(400),
    NOW / 1000 + 2 * DAY,
  )]);
  let mut dashboard = dashboard(chain.clone());

  dashboard.connect().await?;
  assert_eq!(dashboard.account_label().as_deref(), Some("0x0000...11ce"));

  let listing = dashboard.listing();
  assert!(listing.closed.is_empty());
  let card = &listing.active[0];
  assert_eq!(card.metrics.progress_fraction(), Some(0.4));
  assert_eq!(card.metrics.days_left, 2);

  assert!(dashboard.select(0));
  assert_eq!(dashboard.view(), ViewState::DetailView(0));
  assert_eq!(dashboard.selected().map(|c| c.campaign.id), Some(0));

  dashboard.donate("600").await?;

  assert_eq!(dashboard.view(), ViewState::Browsing);
  let campaign = dashboard.store().get(0).unwrap();
  assert_eq!(campaign.amount_collected, Amount::from_whole(1000));
  assert_eq!(campaign.backers(), 2);

  let listing = dashboard.listing();
  assert!(listing.active.is_empty());
  assert_eq!(listing.closed.len(), 1);
  assert_eq!(listing.closed[0].metrics.progress_fraction(), Some(1.0));

  Ok(())
}

#[tokio::test]
async fn low_balance_alert_returns_to_campaign() -> anyhow::Result<()> {
  let chain = MockChain::with_campaigns(vec![campaign(
    0,
    Amount::from_whole(10),
    Amount::ZERO,
    NOW / 1000 + DAY,
  )]);
  let mut dashboard = dashboard(chain.clone());
  dashboard.connect().await?;
  assert!(dashboard.select(0));

  chain.faults.lock().submit = Some(ProviderError::InsufficientFunds);
  assert_eq!(dashboard.donate("5").await, Err(Error::InsufficientFunds));
  assert_eq!(dashboard.view(), ViewState::LowBalanceAlert(0));

  // nothing else can be opened while the alert is up
  assert!(!dashboard.open_create());
  assert!(!dashboard.close());
  let refused = dashboard.donate("1").await.unwrap_err();
  assert_eq!(refused, Error::NoCampaignSelected);
  assert_eq!(refused.class(), MessageClass::Notice);
  assert_eq!(chain.writes(), 0);

  assert!(dashboard.dismiss_alert());
  assert_eq!(dashboard.view(), ViewState::DetailView(0));

  // other failures keep the detail view open
  chain.faults.lock().revert = Some("campaign is closed".into());
  assert!(matches!(
    dashboard.donate("1").await,
    Err(Error::TransactionRejected(_))
  ));
  assert_eq!(dashboard.view(), ViewState::DetailView(0));

  Ok(())
}

#[tokio::test]
async fn created_campaign_is_listed_when_the_form_closes(
) -> anyhow::Result<()> {
  let chain = MockChain::with_campaigns(vec![]);
  let mut dashboard = dashboard(chain.clone());
  dashboard.connect().await?;
  assert!(dashboard.listing().active.is_empty());

  assert!(dashboard.open_create());
  assert_eq!(dashboard.view(), ViewState::CreateModalOpen);

  let form = CampaignForm {
    title: "Community garden".into(),
    description: "Raised beds and a tool shed".into(),
    target: "12.5".into(),
    deadline: "2030-06-01".into(),
    image: String::new(),
  };
  dashboard.submit_create(&form).await?;

  assert_eq!(dashboard.view(), ViewState::Browsing);
  let listing = dashboard.listing();
  assert_eq!(listing.active.len(), 1);
  let created = &listing.active[0].campaign;
  assert_eq!(created.owner, alice());
  assert_eq!(created.target, Amount::parse_ether("12.5")?);
  assert_eq!(listing.active[0].metrics.progress_bps, Some(0));

  Ok(())
}

#[tokio::test]
async fn invalid_form_keeps_modal_open() -> anyhow::Result<()> {
  let chain = MockChain::with_campaigns(vec![]);
  let mut dashboard = dashboard(chain.clone());
  dashboard.connect().await?;
  assert!(dashboard.open_create());

  let form = CampaignForm {
    title: "Too late".into(),
    description: "Deadline already passed".into(),
    target: "1".into(),
    deadline: "2020-01-01".into(),
    ..Default::default()
  };
  assert!(matches!(
    dashboard.submit_create(&form).await,
    Err(Error::InvalidDeadline(_))
  ));
  assert_eq!(dashboard.view(), ViewState::CreateModalOpen);
  assert_eq!(chain.writes(), 0);

  assert!(dashboard.close());
  assert_eq!(dashboard.view(), ViewState::Browsing);

  Ok(())
}

#[tokio::test]
async fn writes_require_a_connected_wallet() {
  let chain = MockChain::with_campaigns(vec![campaign(
    0,
    Amount::from_whole(10),
    Amount::ZERO,
    NOW / 1000 + DAY,
  )]);
  let mut dashboard = dashboard(chain.clone());

  // unknown campaigns cannot be selected before the first load
  assert!(!dashboard.select(0));
  assert_eq!(
    dashboard.donate("1").await,
    Err(Error::NoCampaignSelected)
  );
  assert!(dashboard.open_create());
  assert_eq!(
    dashboard.submit_create(&CampaignForm::default()).await,
    Err(Error::NotConnected)
  );
  assert_eq!(dashboard.account_label(), None);
  assert_eq!(chain.writes(), 0);
}

#[tokio::test]
async fn failed_initial_load_still_connects() -> anyhow::Result<()> {
  let chain = MockChain::with_campaigns(vec![campaign(
    0,
    Amount::from_whole(10),
    Amount::ZERO,
    NOW / 1000 + DAY,
  )]);
  chain.faults.lock().reads = Some(ProviderError::Transport("down".into()));
  let dashboard = dashboard(chain.clone());

  assert_eq!(dashboard.connect().await?, alice());
  assert!(dashboard.store().is_empty());

  chain.faults.lock().reads = None;
  dashboard.refresh().await?;
  assert_eq!(dashboard.listing().active.len(), 1);

  Ok(())
}
