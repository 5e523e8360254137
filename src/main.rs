use std::net::SocketAddr;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use comfy_table::{modifiers, presets, ContentArrangement, Table};
use terminal_size::{terminal_size, Width};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

use triptailor::api::{self, ApiClient};
use triptailor::catalog;
use triptailor::config::{Settings, DEFAULT_HOST, DEFAULT_PORT};
use triptailor::models::{AppState, CountryCode, ItineraryReport, Overview, Region, Theme};
use triptailor::planner::{self, lock, parse_date};
use triptailor::report::{load_report_page, Fetched, ReportPage};
use triptailor::routes::build_router;

fn build_client(env_file: Option<&str>) -> (Settings, ApiClient) {
    let settings = Settings::from_env(env_file);
    match ApiClient::new(&settings) {
        Ok(api) => (settings, api),
        Err(e) => {
            tracing::error!(%e, "Failed to build HTTP client");
            eprintln!("{}: {}", yansi::Paint::red("Failed to create HTTP client"), e);
            process::exit(1);
        }
    }
}

fn fail(context: &str, message: String) -> ! {
    eprintln!("{}: {}", yansi::Paint::new(context).red(), message);
    process::exit(1);
}

async fn start_server(api: ApiClient, host: &str, port: u16, stylesheet: Option<String>) {
    let mut state = AppState::new(api);
    if let Some(path) = stylesheet {
        match std::fs::read_to_string(&path) {
            Ok(css) => {
                state.custom_css = Some(css);
                tracing::info!("Loaded custom stylesheet from {}", path);
            }
            Err(e) => {
                tracing::error!(%e, "Failed to read custom stylesheet");
                fail(&format!("Failed to read custom stylesheet at {}", path), e.to_string());
            }
        }
    }

    let addr: SocketAddr = match format!("{}:{}", host, port).parse() {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(%e, "Invalid host/port format");
            fail("Invalid host/port format", e.to_string());
        }
    };
    let app = build_router(state);
    tracing::info!(%addr, "Starting TripTailor server");
    println!(
        "{} {}",
        yansi::Paint::new("Planner running on").green(),
        yansi::Paint::new(format!("http://{}", addr)).cyan()
    );
    match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => {
            if let Err(e) = axum::serve(listener, app).await {
                tracing::error!(%e, "Server encountered an error while running");
                fail("Server error", e.to_string());
            }
        }
        Err(e) => {
            tracing::error!(%e, "Failed to bind to address; is the port already in use?");
            eprintln!(
                "{}: {}\n{}",
                yansi::Paint::new(format!("Failed to bind to {}", addr)).red(),
                e,
                yansi::Paint::new("Stop the process using this port, or pass a different --port value.").yellow()
            );
            process::exit(1);
        }
    }
}

fn new_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    if let Some((Width(w), _)) = terminal_size() {
        table.set_width(w.saturating_sub(4));
    }
    table
}

fn parse_country(raw: &str) -> CountryCode {
    raw.parse().unwrap_or_else(|e: String| fail("Invalid country", e))
}

async fn find_region(api: &ApiClient, country: CountryCode, code: &str) -> Region {
    let regions = api::load_regions(api, country)
        .await
        .unwrap_or_else(|e| fail("Failed to load regions", e.user_message()));
    match regions.into_iter().find(|r| r.code == code) {
        Some(r) => r,
        None => fail("Unknown region", format!("{} has no region '{}'", catalog::country_label(country), code)),
    }
}

fn print_regions(regions: &[Region]) {
    if regions.is_empty() {
        println!("(no regions)");
        return;
    }
    let mut table = new_table();
    table.set_header(vec!["Code", "Name", "Lat", "Lon"]);
    for r in regions {
        table.add_row(vec![r.code.clone(), r.name.clone(), format!("{:.4}", r.lat), format!("{:.4}", r.lon)]);
    }
    println!("\n{table}\n");
}

fn print_overview(country: CountryCode, overview: &Overview) {
    let mut table = new_table();
    table.set_header(vec!["ID", "Landmark", "Description"]);
    for l in &overview.landmarks {
        table.add_row(vec![l.id.to_string(), l.name.clone(), l.description.clone()]);
    }
    println!("\n{table}");
    let recs = overview.recommendations();
    if !recs.is_empty() {
        println!(
            "\n{}",
            yansi::Paint::new(catalog::country_meta(country).recommendations_label).bold()
        );
        let mut table = new_table();
        table.set_header(vec!["Name", "Detail"]);
        for r in recs {
            table.add_row(vec![r.name, r.detail]);
        }
        println!("{table}");
    }
    println!();
}

fn print_report(report: &ItineraryReport) {
    println!("\n{}", yansi::Paint::new(&report.overview.title).bold().underline());
    if !report.overview.summary.is_empty() {
        println!("{}", report.overview.summary);
    }
    for h in &report.overview.highlights {
        println!("  • {}", h);
    }
    let mut table = new_table();
    table.set_header(vec!["Day", "Stop", "Reason", "Picked"]);
    for day in &report.daily_plan {
        for stop in &day.landmarks {
            table.add_row(vec![
                format!("{} · {}", day.day, day.title),
                stop.name.clone(),
                stop.reason.clone(),
                if stop.is_user_selected { "✓".to_string() } else { String::new() },
            ]);
        }
    }
    println!("\n{table}");
    for (label, tips) in [("Packing", &report.tips.packing), ("Local tips", &report.tips.local)] {
        if !tips.is_empty() {
            println!("\n{}", yansi::Paint::new(label).bold());
            for t in tips {
                println!("  - {}", t);
            }
        }
    }
    println!();
}

fn print_report_page(page: &ReportPage) {
    let h = &page.handoff;
    println!(
        "{} {} · {} ({} to {}, {})",
        yansi::Paint::new("Trip:").bold(),
        h.country_label,
        h.region_label,
        h.start_date,
        h.end_date,
        h.theme
    );
    let mut table = new_table();
    table.set_header(vec!["Checklist item", "Scheduled"]);
    for p in &page.placements {
        let when = match &p.scheduled {
            Some(v) => format!("Day {} · {}", v.day, v.day_title),
            None => "Not scheduled".to_string(),
        };
        table.add_row(vec![p.item.name.clone(), when]);
    }
    println!("\n{table}");
    match &page.report {
        Fetched::Ready(report) => print_report(report),
        Fetched::Failed(msg) => eprintln!("{}: {}", yansi::Paint::new("Report unavailable").red(), msg),
        Fetched::Skipped => {}
    }
    if let Some(msg) = page.travel.error() {
        eprintln!("{}: {}", yansi::Paint::new("Travel overview unavailable").yellow(), msg);
    }
    if let Some(name) = &page.csv_filename {
        println!("{} {}", yansi::Paint::new("CSV export:").dim(), name);
    }
}

#[derive(Parser)]
#[command(
    name = "triptailor",
    author,
    version,
    about = "TripTailor itinerary planner",
    long_about = r#"TripTailor: pick a country, a region and travel dates, check the landmarks you want to see and get a day-by-day itinerary.

Run `serve` for the browser UI, or drive the same planning flow from the terminal.

Examples:
  1) Browser UI:
      triptailor serve --port 5173
  2) Explore:
      triptailor regions --country JP
      triptailor overview --country JP --region fukuoka
  3) Plan from the terminal:
      triptailor plan --country JP --region fukuoka --start 2024-05-01 --end 2024-05-03 --landmark 3 --landmark 8
"#,
    after_help = "Use `triptailor <subcommand> --help` for subcommand options. Set API_BASE_URL (or --env-file) to point at the backend."
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
    /// Disable colorized output
    #[arg(long, global = true)]
    no_color: bool,
    /// Disable request logging
    #[arg(long, global = true)]
    silent: bool,
    /// Path to .env file
    #[arg(long, global = true)]
    env_file: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web server
    Serve {
        /// Host to bind to
        #[arg(long, default_value_t = String::from(DEFAULT_HOST))]
        host: String,
        /// Port to bind to
        #[arg(long, default_value_t = DEFAULT_PORT)]
        port: u16,
        /// Path to a custom stylesheet to serve instead of the default
        #[arg(long)]
        stylesheet: Option<String>,
    },
    /// Validate configuration and backend connectivity
    #[command(long_about = "Print the effective configuration and try to list countries from the backend.")]
    CheckConfig,
    /// List supported countries
    Countries,
    /// List the regions of a country
    Regions {
        #[arg(long)]
        country: String,
    },
    /// Show landmarks and recommendations for a region
    Overview {
        #[arg(long)]
        country: String,
        #[arg(long)]
        region: String,
    },
    /// Daily forecast for a region over a date range
    Weather {
        #[arg(long)]
        country: String,
        #[arg(long)]
        region: String,
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        start: String,
        /// Last day, inclusive (YYYY-MM-DD)
        #[arg(long)]
        end: String,
    },
    /// Plan a trip end to end and print the generated itinerary
    #[command(long_about = "Select a region, dates and landmarks, submit the itinerary request once and print the report with each checked landmark's scheduled day.")]
    Plan {
        #[arg(long)]
        country: String,
        #[arg(long)]
        region: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        /// Landmark id to put on the checklist (repeatable)
        #[arg(long = "landmark", required = true)]
        landmarks: Vec<i64>,
        /// Overrides the country's default theme
        #[arg(long)]
        theme: Option<String>,
    },
    /// Print the report of an existing itinerary
    Report {
        itinerary_id: i64,
        /// With --region, also print the region's recommendations
        #[arg(long, requires = "region")]
        country: Option<String>,
        #[arg(long, requires = "country")]
        region: Option<String>,
    },
    /// Download the CSV export of an itinerary
    Csv {
        itinerary_id: i64,
        /// Destination file (defaults to itinerary_report_<id>.csv)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if cli.no_color {
        yansi::whenever(yansi::Condition::NEVER);
    }
    api::set_silent(cli.silent);

    let env_file = cli.env_file.as_deref();
    let Some(command) = cli.command else {
        let (_, api) = build_client(env_file);
        start_server(api, DEFAULT_HOST, DEFAULT_PORT, None).await;
        return;
    };

    match command {
        Commands::Serve { host, port, stylesheet } => {
            // The browser UI is not echoed as curl lines.
            api::set_silent(true);
            let (_, api) = build_client(env_file);
            start_server(api, &host, port, stylesheet).await;
        }
        Commands::CheckConfig => {
            let (settings, api) = build_client(env_file);
            println!("API_BASE_URL      {}", settings.api_base_url);
            println!("API_TIMEOUT_SECS  {}", settings.request_timeout.as_secs());
            match api::load_countries(&api).await {
                Ok(list) => println!(
                    "{}",
                    yansi::Paint::new(format!("Configuration looks valid ({} countries returned)", list.len())).green()
                ),
                Err(e) => fail("Configuration appears invalid", e.to_string()),
            }
        }
        Commands::Countries => {
            let (_, api) = build_client(env_file);
            let (countries, error) = api::load_countries_or_fallback(&api).await;
            if let Some(e) = error {
                eprintln!("{}: {}", yansi::Paint::new("Using built-in list").yellow(), e.user_message());
            }
            let mut table = new_table();
            table.set_header(vec!["Code", "Country", "Default theme"]);
            for c in countries {
                table.add_row(vec![
                    c.code.to_string(),
                    c.label,
                    catalog::default_theme(c.code).to_string(),
                ]);
            }
            println!("\n{table}\n");
        }
        Commands::Regions { country } => {
            let (_, api) = build_client(env_file);
            let country = parse_country(&country);
            match api::load_regions(&api, country).await {
                Ok(regions) => print_regions(&regions),
                Err(e) => fail("Failed to load regions", e.user_message()),
            }
        }
        Commands::Overview { country, region } => {
            let (_, api) = build_client(env_file);
            let country = parse_country(&country);
            match api::load_overview(&api, country, &region).await {
                Ok(overview) => print_overview(country, &overview),
                Err(e) => fail("Failed to load overview", e.user_message()),
            }
        }
        Commands::Weather { country, region, start, end } => {
            let (_, api) = build_client(env_file);
            let country = parse_country(&country);
            let start = parse_date(&start).unwrap_or_else(|e| fail("Invalid --start", e.to_string()));
            let end = parse_date(&end).unwrap_or_else(|e| fail("Invalid --end", e.to_string()));
            let region = find_region(&api, country, &region).await;
            match api::load_forecast(&api, region.lat, region.lon, start, end).await {
                Ok(forecast) => {
                    let mut table = new_table();
                    table.set_header(vec!["Date", "", "Status", "Max", "Min"]);
                    for d in &forecast.daily {
                        table.add_row(vec![
                            d.date.to_string(),
                            catalog::weather_glyph(&d.icon_type).to_string(),
                            d.status.clone(),
                            format!("{:.1}", d.temperature_max),
                            format!("{:.1}", d.temperature_min),
                        ]);
                    }
                    println!("\n{} · {}\n{table}\n", catalog::country_label(country), region.name);
                }
                Err(e) => fail("Failed to load forecast", e.user_message()),
            }
        }
        Commands::Plan { country, region, start, end, landmarks, theme } => {
            let (_, api) = build_client(env_file);
            let country = parse_country(&country);
            let start = parse_date(&start).unwrap_or_else(|e| fail("Invalid --start", e.to_string()));
            let end = parse_date(&end).unwrap_or_else(|e| fail("Invalid --end", e.to_string()));
            let theme = theme.map(|t| t.parse::<Theme>().unwrap_or_else(|e| fail("Invalid --theme", e)));

            let session = planner::new_shared_session();
            planner::choose_country(&session, &api, country).await;
            if let Some(msg) = lock(&session).regions_error() {
                fail("Failed to load regions", msg.to_string());
            }
            if let Err(e) = planner::choose_region(&session, &api, &region).await {
                fail("Cannot select region", e.user_message());
            }
            if let Some(msg) = lock(&session).overview_error() {
                fail("Failed to load landmarks", msg.to_string());
            }
            {
                let mut s = lock(&session);
                s.set_dates(Some(start), Some(end));
                s.set_theme(theme);
                for id in &landmarks {
                    if let Err(e) = s.add_landmark(*id) {
                        fail("Cannot check landmark", e.user_message());
                    }
                }
            }

            let handoff = match planner::generate(&session, &api).await {
                Ok(h) => h,
                Err(e) => fail("Itinerary generation failed", e.user_message()),
            };
            if let Some(page) = load_report_page(&api, Some(&handoff)).await {
                print_report_page(&page);
            }
        }
        Commands::Report { itinerary_id, country, region } => {
            let (_, api) = build_client(env_file);
            let travel = async {
                match (country.as_deref(), region.as_deref()) {
                    (Some(c), Some(r)) => {
                        let code = parse_country(c);
                        Some((code, api::load_overview(&api, code, r).await))
                    }
                    _ => None,
                }
            };
            let (report, travel) = tokio::join!(api::load_report(&api, itinerary_id), travel);
            match report {
                Ok(r) => print_report(&r),
                Err(e) => fail("Failed to load report", e.user_message()),
            }
            match travel {
                Some((code, Ok(overview))) => print_overview(code, &overview),
                Some((_, Err(e))) => eprintln!("{}: {}", yansi::Paint::new("Travel overview unavailable").yellow(), e.user_message()),
                None => {}
            }
        }
        Commands::Csv { itinerary_id, output } => {
            let (_, api) = build_client(env_file);
            let dest = output.unwrap_or_else(|| PathBuf::from(api::csv_filename(itinerary_id)));
            match api::download_csv_to(&api, itinerary_id, &dest, true).await {
                Ok(n) => println!(
                    "{} {} ({} bytes)",
                    yansi::Paint::new("Saved").green(),
                    dest.display(),
                    n
                ),
                Err(e) => fail("CSV download failed", e.user_message()),
            }
        }
    }
}
