use anyhow::Context;
use rentapp_shell::catalog::{PropertyTaxonomy, StaticTaxonomy, WardCatalog};
use rentapp_shell::install::{InstallOutcome, InstallTracker, SimulatedEnvironment};
use rentapp_shell::models::Region;
use rentapp_shell::navigation::{MenuVariant, NavigationMenu, Viewer};
use rentapp_shell::search::{search_heading, ResultsView, SearchBus, SearchDispatcher, SearchOverlay};
use rentapp_shell::shell::{BrowserShell, DisplayProbe, MemoryShell, PageShell, StaticProbe};
use rentapp_shell::ShellConfig;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ShellConfig::load()?;

    // Initialize logging
    let filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("🏠 Rentapp Shell");
    info!("================");

    let dispatcher = SearchDispatcher::from_config(&config, SearchBus::new());
    let mut catalog = WardCatalog::with_defaults();
    let taxonomy = StaticTaxonomy::default();

    match config.browser_url.as_deref() {
        Some(url) => {
            let mut shell = BrowserShell::launch(url, "/contact")?;
            let standalone = run_install(&shell, config.install_settle).await?;
            run_search(&mut shell, &dispatcher, &mut catalog, &taxonomy, standalone)?;
        }
        None => {
            info!("No browser URL configured, using the in-memory shell");
            let mut shell = MemoryShell::at("/contact");
            let standalone = run_install(&StaticProbe::browser_tab(), config.install_settle).await?;
            run_search(&mut shell, &dispatcher, &mut catalog, &taxonomy, standalone)?;
        }
    }

    Ok(())
}

/// Walk the install tracker through an offer and an accepted prompt
async fn run_install(probe: &dyn DisplayProbe, settle: Duration) -> anyhow::Result<bool> {
    let (env, signals) = SimulatedEnvironment::new();
    let mut tracker = InstallTracker::new(probe, signals);
    if tracker.is_installed() {
        info!("Already running as an installed app");
        return Ok(true);
    }

    let decision = env.offer_install().context("install tracker not listening")?;
    tracker.await_offer(settle).await;
    info!("Install state: {:?}", tracker.state());

    decision.decide(InstallOutcome::Accepted);
    if tracker.request_install().await? {
        env.complete_install();
        tracker.pump();
    } else {
        warn!("Install prompt was not accepted");
    }
    tracker.teardown();

    info!("Install state: {:?}", tracker.state());
    Ok(tracker.is_installed())
}

/// Fill in the search overlay from a non-results view and follow the handoff
fn run_search(
    shell: &mut dyn PageShell,
    dispatcher: &SearchDispatcher,
    catalog: &mut WardCatalog,
    taxonomy: &dyn PropertyTaxonomy,
    standalone: bool,
) -> anyhow::Result<()> {
    let path = shell.current_path();
    let menu = NavigationMenu::new(MenuVariant::Popup);
    let labels: Vec<_> = menu
        .items(&path, &Viewer::anonymous(), standalone)
        .iter()
        .map(|item| item.label)
        .collect();
    info!("{:?} menu on {}: {}", menu.variant(), path, labels.join(" | "));

    let mut overlay = SearchOverlay::new();
    overlay.open();
    info!("{}", search_heading(&path));
    info!("Property types: {}", taxonomy.categories().join(", "));

    if let Some(form) = overlay.form_mut() {
        form.set_property_type("Apartment", taxonomy);
        form.set_profile("2 Bedrooms", taxonomy);
        form.set_status("available");
        form.set_region(Region::Arusha.slug());
        form.select_ward("other", catalog);
        form.edit_custom_ward("Kisongo West");
        form.confirm_custom_ward(catalog);
        form.set_min_price("150000");
        form.set_max_price("1,200,000");
        info!(
            "Price range: {} - {}",
            form.min_price().display(),
            form.max_price().display()
        );
    }

    if !dispatcher.renders_in_place(&path) {
        info!("Results will open on {}", dispatcher.results_path());
    }
    let delivery = overlay.submit(dispatcher, shell)?;
    info!("Delivery: {:?}", delivery);

    let view = ResultsView::mount(dispatcher, shell)?;
    println!("Results view {} shows:", view.path());
    println!("{}", serde_json::to_string_pretty(view.active())?);

    if let Some(wards) = catalog.wards(Region::Arusha) {
        let tail = &wards[wards.len().saturating_sub(3)..];
        println!("Last {} wards: {}", Region::Arusha.label(), tail.join(", "));
    }

    Ok(())
}
