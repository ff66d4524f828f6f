use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use courtside::config::ClientConfig;
use courtside::net::api::{ApiClient, ApiError};
use courtside::net::types::{RosterSlot, ScoreRange};
use courtside::state::ViewError;
use courtside::state::admin::AdminView;
use courtside::state::forms::{ValidationError, validate_login, validate_registration};
use courtside::state::leaderboard::{Board, LeaderboardView};
use courtside::state::players::{PlayerFilter, PlayersView, SortKey};
use courtside::state::roster_picker::RosterPicker;
use courtside::state::scores::ScoresView;
use courtside::state::session::Session;
use courtside::state::team::TeamView;
use courtside::storage::{FileTokenStore, StorageError};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    View(#[from] ViewError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error("token storage failed: {0}")]
    Storage(#[from] StorageError),
    #[error("invalid JSON output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "courtside", about = "Fantasy basketball client")]
struct Cli {
    /// Backend origin; overrides COURTSIDE_API_URL.
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Log debug output to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Login(LoginArgs),
    Register(RegisterArgs),
    Logout,
    Whoami,
    Players(PlayersArgs),
    Player {
        player_id: i64,
    },
    PlayerScores {
        player_id: i64,
        #[arg(long)]
        limit: Option<u32>,
    },
    Team(TeamCommand),
    Scores(ScoresCommand),
    Leagues(LeaguesCommand),
    Leaderboard {
        /// Private league id; omit for the solo board.
        #[arg(long)]
        league: Option<i64>,
    },
    Admin(AdminCommand),
}

#[derive(Args, Debug)]
struct LoginArgs {
    username: String,
    #[arg(long, env = "COURTSIDE_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    username: String,
    #[arg(long, env = "COURTSIDE_PASSWORD", hide_env_values = true)]
    password: String,
    /// Repeat of the password; must match.
    #[arg(long)]
    confirm: String,
}

#[derive(Args, Debug)]
struct PlayersArgs {
    #[arg(long)]
    position: Option<String>,
    #[arg(long)]
    team: Option<String>,
    #[arg(long, default_value = "")]
    search: String,
    /// name, score, price_asc or price_desc
    #[arg(long, default_value = "name")]
    sort: SortKey,
    #[arg(long, default_value_t = 1)]
    page: usize,
}

#[derive(Args, Debug)]
struct TeamCommand {
    #[command(subcommand)]
    command: TeamSubcommand,
}

#[derive(Subcommand, Debug)]
enum TeamSubcommand {
    Show,
    Create {
        name: String,
    },
    /// Sign a player into an empty slot.
    Add {
        #[arg(long)]
        slot: RosterSlot,
        player_id: i64,
    },
    /// Sign a player into a slot, releasing its current occupant first.
    Replace {
        #[arg(long)]
        slot: RosterSlot,
        player_id: i64,
    },
    Remove {
        player_id: i64,
    },
    /// Players the team can sign for a slot.
    Available {
        #[arg(long)]
        slot: RosterSlot,
        #[arg(long, default_value = "")]
        search: String,
        /// Show every position instead of the slot's own.
        #[arg(long, default_value_t = false)]
        any_position: bool,
    },
}

#[derive(Args, Debug)]
struct ScoresCommand {
    #[command(subcommand)]
    command: ScoresSubcommand,
}

#[derive(Subcommand, Debug)]
enum ScoresSubcommand {
    History {
        #[arg(long)]
        from: Option<String>,
        #[arg(long)]
        to: Option<String>,
    },
    Day {
        /// YYYY-MM-DD
        date: String,
    },
}

#[derive(Args, Debug)]
struct LeaguesCommand {
    #[command(subcommand)]
    command: LeaguesSubcommand,
}

#[derive(Subcommand, Debug)]
enum LeaguesSubcommand {
    List,
    Show { league_id: i64 },
}

#[derive(Args, Debug)]
struct AdminCommand {
    #[command(subcommand)]
    command: AdminSubcommand,
}

#[derive(Subcommand, Debug)]
enum AdminSubcommand {
    Users,
    Promote { user_id: i64 },
    Demote { user_id: i64 },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let level = if cli.verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::from_env();
    if let Some(url) = cli.api_url.as_deref() {
        config.set_api_url(url);
    }
    tracing::debug!(api_root = %config.api_root(), state_dir = %config.state_dir.display(), "client configured");

    let tokens = Arc::new(FileTokenStore::new(&config.state_dir));
    let api = ApiClient::new(&config, tokens)?;
    let mut session = Session::start(api).await;

    match cli.command {
        Command::Login(args) => run_login(&mut session, args).await,
        Command::Register(args) => run_register(&mut session, args).await,
        Command::Logout => {
            session.logout()?;
            println!("signed out");
            Ok(())
        }
        Command::Whoami => match session.user() {
            Some(user) => print_json(user),
            None => {
                println!("not signed in");
                Ok(())
            }
        },
        Command::Players(args) => run_players(&session, args).await,
        Command::Player { player_id } => print_json(&session.api().player(player_id).await?),
        Command::PlayerScores { player_id, limit } => {
            print_json(&session.api().player_scores(player_id, limit).await?)
        }
        Command::Team(team) => run_team(&session, team).await,
        Command::Scores(scores) => run_scores(&session, scores).await,
        Command::Leagues(leagues) => run_leagues(&session, leagues).await,
        Command::Leaderboard { league } => run_leaderboard(&session, league).await,
        Command::Admin(admin) => run_admin(&session, admin).await,
    }
}

async fn run_login(session: &mut Session, args: LoginArgs) -> Result<(), CliError> {
    validate_login(&args.username, &args.password)?;
    let user = session.login(args.username.trim(), &args.password).await?;
    println!("signed in as {}", user.username);
    Ok(())
}

async fn run_register(session: &mut Session, args: RegisterArgs) -> Result<(), CliError> {
    validate_registration(&args.username, &args.password, &args.confirm)?;
    let user = session.register(args.username.trim(), &args.password).await?;
    println!("account created; signed in as {}", user.username);
    Ok(())
}

async fn run_players(session: &Session, args: PlayersArgs) -> Result<(), CliError> {
    let filter = PlayerFilter { position: args.position, team: args.team, search: args.search };
    let mut view = PlayersView::with(filter, args.sort);
    view.refresh(session.api()).await?;
    view.go_to(args.page);

    let counts: Vec<String> = view
        .position_counts()
        .into_iter()
        .map(|(pos, n)| format!("{pos} {n}"))
        .collect();
    println!("{} players ({})", view.players().len(), counts.join(", "));

    let page = view.page();
    for player in page.items {
        let score = player
            .avg_fantasy_score_last_15
            .map_or_else(|| "-".to_owned(), |s| format!("{s:.1}"));
        println!(
            "{:>6}  {:<28} {:<3} {:<4} ${:>5.1}  avg {score}",
            player.id,
            player.display_name(),
            player.player_position,
            player.team_abbreviation,
            player.fantasy_cost,
        );
    }
    println!("page {} of {}", page.number, page.total_pages);
    Ok(())
}

async fn run_team(session: &Session, team: TeamCommand) -> Result<(), CliError> {
    require_signed_in(session)?;
    let api = session.api();
    let mut view = TeamView::new();
    view.load(api).await?;

    match team.command {
        TeamSubcommand::Show => {}
        TeamSubcommand::Create { name } => {
            view.create_team(api, &name).await?;
        }
        TeamSubcommand::Add { slot, player_id } => {
            view.place_player(api, slot, player_id, None).await?;
        }
        TeamSubcommand::Replace { slot, player_id } => {
            let picker = RosterPicker::open(&view, slot)?;
            picker.choose(api, &mut view, player_id).await?;
        }
        TeamSubcommand::Remove { player_id } => {
            view.remove_player(api, player_id).await?;
        }
        TeamSubcommand::Available { slot, search, any_position } => {
            let mut picker = RosterPicker::open(&view, slot)?;
            picker.load(api).await?;
            picker.set_search(&search);
            if any_position {
                picker.set_position(None);
            }
            println!("cap remaining ${:.1}", picker.salary_cap_remaining());
            for entry in picker.visible() {
                let flags = match (entry.is_affordable, entry.has_cooldown) {
                    (_, true) => " (cooldown)",
                    (false, false) => " (over cap)",
                    (true, false) => "",
                };
                println!(
                    "{:>6}  {:<28} {:<3} ${:>5.1}{flags}",
                    entry.player.id,
                    entry.player.display_name(),
                    entry.player.player_position,
                    entry.price(),
                );
            }
            return Ok(());
        }
    }

    print_team(&view)
}

fn print_team(view: &TeamView) -> Result<(), CliError> {
    let team = view.team().ok_or(ViewError::NoTeam)?;
    println!("{} (#{})", team.name, team.id);
    for (slot, player) in view.slots() {
        match player {
            Some(p) => println!("  {:<4} {:<28} ${:.1}", slot.code(), p.display_name(), p.fantasy_cost),
            None => println!("  {:<4} -", slot.code()),
        }
    }
    if let Some(roster) = view.roster() {
        println!(
            "cap used ${:.1}, remaining ${:.1}, {}",
            roster.salary_cap_used, roster.salary_cap_remaining, roster.roster_status
        );
    }
    Ok(())
}

async fn run_scores(session: &Session, scores: ScoresCommand) -> Result<(), CliError> {
    require_signed_in(session)?;
    let mut view = ScoresView::new();
    match scores.command {
        ScoresSubcommand::History { from, to } => {
            let range = ScoreRange { start_date: from, end_date: to };
            view.load_history(session.api(), &range).await?;
            for day in view.history() {
                println!("{}  {:>7.2}  ({} played)", day.score_date, day.total_score, day.players_who_played);
            }
            println!("total {:.2}", view.total());
        }
        ScoresSubcommand::Day { date } => {
            view.load_day(session.api(), &date).await?;
            if let Some((date, day)) = view.day() {
                println!("{date}  team {:.2}", day.team_score);
                for entry in &day.players {
                    println!("  {:<28} {:>6.2}", entry.player.display_name(), entry.score);
                }
            }
        }
    }
    Ok(())
}

async fn run_leagues(session: &Session, leagues: LeaguesCommand) -> Result<(), CliError> {
    match leagues.command {
        LeaguesSubcommand::List => print_json(&session.api().leagues().await?),
        LeaguesSubcommand::Show { league_id } => print_json(&session.api().league(league_id).await?),
    }
}

async fn run_leaderboard(session: &Session, league: Option<i64>) -> Result<(), CliError> {
    let board = league.map_or(Board::Solo, Board::League);
    let mut view = LeaderboardView::new(board);
    view.load(session.api()).await?;

    if let Some(league) = view.league() {
        println!("{}", league.name);
    }
    let me = session.user().map(|u| u.username.as_str());
    for entry in view.entries() {
        let marker = if Some(entry.owner_username.as_str()) == me { "*" } else { " " };
        println!(
            "{marker}{:>3}. {:<24} {:<16} {:>8.2}  {}",
            entry.rank, entry.team_name, entry.owner_username, entry.total_score, entry.trend
        );
    }
    Ok(())
}

async fn run_admin(session: &Session, admin: AdminCommand) -> Result<(), CliError> {
    let mut view = AdminView::open(session).await?;
    match admin.command {
        AdminSubcommand::Users => {}
        AdminSubcommand::Promote { user_id } => view.promote(session, user_id).await?,
        AdminSubcommand::Demote { user_id } => view.demote(session, user_id).await?,
    }
    print_json(view.users())
}

fn require_signed_in(session: &Session) -> Result<(), CliError> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(ViewError::NotSignedIn.into())
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
