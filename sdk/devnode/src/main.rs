use {
  crate::settings::SystemSettings,
  clap::Parser,
  crowdfund_client_sdk::{
    primitives::{Address, Campaign},
    CampaignForm,
    Clock,
    Config,
    Dashboard,
    Error,
    SystemClock,
  },
  crowdfund_devnode::{dev_accounts, LocalChain, LocalWallet},
  std::{sync::Arc, time::Duration},
  time::{
    format_description::FormatItem,
    macros::format_description,
    OffsetDateTime,
  },
  tracing::{info, warn},
  tracing_subscriber::EnvFilter,
};

mod settings;

const WEEK: Duration = Duration::from_secs(7 * 86_400);

/// What a `datetime-local` form input submits.
const FORM_DATETIME: &[FormatItem<'static>] =
  format_description!("[year]-[month]-[day]T[hour]:[minute]");

type Session = Dashboard<LocalWallet>;

fn session(
  chain: &Arc<LocalChain>,
  account: Address,
  clock: &Arc<dyn Clock>,
  config: &Config,
) -> Session {
  Dashboard::with_clock(
    Some(LocalWallet::new(chain.clone(), vec![account])),
    config.clone(),
    clock.clone(),
  )
}

fn print_listing(session: &Session) {
  let listing = session.listing();
  info!(
    "{} active and {} closed campaigns",
    listing.active.len(),
    listing.closed.len()
  );
  for card in listing.active.iter().chain(listing.closed.iter()) {
    let progress = card
      .metrics
      .progress_fraction()
      .map(|p| format!("{:.1}%", p * 100.0))
      .unwrap_or_else(|| "n/a".into());
    info!(
      "  #{} '{}' by {}: {} of {} ({progress}), {} days left, {} backers",
      card.campaign.id,
      card.campaign.title,
      card.campaign.owner.short(),
      card.campaign.amount_collected,
      card.campaign.target,
      card.metrics.days_left,
      card.campaign.backers(),
    );
  }
}

fn latest(session: &Session) -> Option<Campaign> {
  session.store().snapshot().last().cloned()
}

fn main() -> anyhow::Result<()> {
  // configure logging, RUST_LOG overrides the default level
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info")),
    )
    .init();

  // gather CLI parameters
  let settings = SystemSettings::parse();
  info!("startup settings: {settings:#?}");
  anyhow::ensure!(
    settings.accounts() >= 2,
    "the scripted session needs an owner and at least one backer"
  );

  // the local offset is only readable while no other thread exists,
  // so it is resolved before the runtime starts its workers
  let config = Config::local();
  info!("form deadlines are read at utc offset {}", config.utc_offset);

  tokio::runtime::Builder::new_multi_thread()
    .enable_all()
    .build()?
    .block_on(run(settings, config))
}

async fn run(settings: SystemSettings, config: Config) -> anyhow::Result<()> {
  let clock: Arc<dyn Clock> = Arc::new(SystemClock);
  let chain =
    LocalChain::new(settings.mining(), settings.fee(), clock.clone());
  let accounts = dev_accounts(settings.accounts());
  for account in &accounts {
    chain.fund(*account, settings.balance())?;
  }

  // the first account creates a campaign running for a week
  let mut owner = session(&chain, accounts[0], &clock, &config);
  owner.connect().await?;
  info!("owner connected as {:?}", owner.account_label());

  // typed the way the user would, in local wall-clock time
  let deadline = (OffsetDateTime::now_utc().to_offset(config.utc_offset)
    + WEEK)
    .format(FORM_DATETIME)?;
  owner.open_create();
  let receipt = owner
    .submit_create(&CampaignForm {
      title: "Devnode demo".into(),
      description: "A campaign created by the scripted session".into(),
      target: "10".into(),
      deadline,
      image: String::new(),
    })
    .await?;
  info!("campaign created in block {}", receipt.block);

  let campaign = latest(&owner)
    .ok_or_else(|| anyhow::anyhow!("created campaign is not listed"))?;

  // every other account backs it from its own session
  for account in &accounts[1..] {
    let mut backer = session(&chain, *account, &clock, &config);
    backer.connect().await?;
    backer.select(campaign.id);
    let receipt = backer.donate("2.5").await?;
    info!(
      "{} donated in block {}, balance now {}",
      account.short(),
      receipt.block,
      chain.balance(account)
    );
  }

  // the last backer tries to donate more than it holds
  let mut broke = session(
    &chain,
    accounts[accounts.len() - 1],
    &clock,
    &config,
  );
  broke.connect().await?;
  broke.select(campaign.id);
  let too_much = settings
    .balance()
    .checked_add(settings.balance())
    .unwrap_or(settings.balance());
  match broke.donate(&too_much.to_string()).await {
    Err(Error::InsufficientFunds) => {
      warn!(
        "donation of {too_much} refused: insufficient funds, view {:?}",
        broke.view()
      );
      broke.dismiss_alert();
      broke.close();
    }
    other => warn!("unexpected outcome of an oversized donation: {other:?}"),
  }

  owner.refresh().await?;
  print_listing(&owner);
  info!(
    "owner balance {} at height {}",
    chain.balance(&accounts[0]),
    chain.height()
  );

  Ok(())
}
