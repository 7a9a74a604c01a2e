// Command-line entry point for Kidcatch.
//
// Usage:
//   kidcatch serve [--port N] [--bind ADDR] [--data FILE] [--app-url URL] [--workers N]
//       Run the JSON API. Enrichment comes from GEMINI_API_KEY / GEMINI_MODEL /
//       GEMINI_ENDPOINT; without a key the static guidance is used.
//   kidcatch create
//       Walk through the guided creation flow on stdin/stdout.
//   kidcatch describe --object 恐龍 --catcher 籃子 [--color 金色] [--difficulty hard]
//       Print the effect text and derived round parameters.
//   kidcatch play [same options as describe] [--seed N] [--scene FILE] [--json]
//       Play one headless round with a simple chasing bot.
//
// `--verbose` switches logging from INFO to DEBUG.

use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::thread;

use clap::{Args, Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use kidcatch_guide::{CreationFlow, FlowError, FlowProgress, Guidance, Guide};
use kidcatch_mapping::{GameConfiguration, default_lexicon};
use kidcatch_protocol::PreviewRequest;
use kidcatch_scene::{CatchScene, SceneConfig, SceneInput, end_message};
use kidcatch_server::{App, ServerConfig, start_server};

/// Catch-game co-creation for parents and children.
#[derive(Parser)]
#[command(name = "kidcatch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen address
        #[arg(long)]
        bind: Option<String>,

        /// Persist games to this JSON file instead of memory
        #[arg(long)]
        data: Option<PathBuf>,

        /// Base URL for share links
        #[arg(long)]
        app_url: Option<String>,

        /// Request worker threads
        #[arg(long)]
        workers: Option<usize>,
    },

    /// Create a game interactively
    Create,

    /// Describe a game configuration
    Describe(GameArgs),

    /// Play one headless round
    Play {
        #[command(flatten)]
        game: GameArgs,

        /// Random seed
        #[arg(long, default_value = "1")]
        seed: u64,

        /// Scene tuning file (JSON)
        #[arg(long)]
        scene: Option<PathBuf>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Args)]
struct GameArgs {
    /// What falls
    #[arg(short, long)]
    object: Option<String>,

    /// What catches
    #[arg(short, long)]
    catcher: Option<String>,

    /// Object color
    #[arg(long)]
    color: Option<String>,

    /// easy, medium or hard
    #[arg(short, long)]
    difficulty: Option<String>,

    /// Game title
    #[arg(short, long)]
    title: Option<String>,
}

impl GameArgs {
    fn configuration(self) -> GameConfiguration {
        PreviewRequest {
            object_type: self.object,
            catcher_type: self.catcher,
            object_color: self.color,
            difficulty: self.difficulty,
            game_title: self.title,
        }
        .into_configuration()
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Serve {
            port,
            bind,
            data,
            app_url,
            workers,
        } => {
            let mut config = ServerConfig::from_env();
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(bind) = bind {
                config.bind_addr = bind;
            }
            if let Some(app_url) = app_url {
                config.app_url = app_url;
            }
            if let Some(workers) = workers {
                config.workers = workers;
            }
            config.data_path = data;
            serve(&config)?;
        }
        Commands::Create => {
            let config = ServerConfig::from_env();
            create(&Guide::from_config(&config.enrichment))?;
        }
        Commands::Describe(game) => describe(&game.configuration()),
        Commands::Play {
            game,
            seed,
            scene,
            json,
        } => {
            let scene_config = match scene {
                Some(path) => SceneConfig::from_json(&std::fs::read_to_string(path)?)?,
                None => SceneConfig::default(),
            };
            play(&game.configuration(), scene_config, seed, json)?;
        }
    }
    Ok(())
}

fn serve(config: &ServerConfig) -> Result<(), Box<dyn Error>> {
    let app = App::from_config(config)?;
    let (_handle, addr) = start_server(config, app)?;
    println!("Kidcatch API listening on http://{addr}");
    println!("Press Ctrl+C to stop.");
    // The process exits on SIGINT; workers are torn down with it.
    loop {
        thread::park();
    }
}

fn print_guidance(guidance: &Guidance) {
    println!();
    println!("{}", guidance.guidance);
    if let Some(effect) = &guidance.game_effect {
        println!();
        println!("{effect}");
    }
    for question in &guidance.suggested_questions {
        println!("  ? {question}");
    }
}

fn create(guide: &Guide) -> Result<(), Box<dyn Error>> {
    let mut flow = CreationFlow::start(guide);
    print_guidance(flow.guidance());

    let mut lines = io::stdin().lock().lines();
    loop {
        print!("[{}] > ", flow.current_step().title());
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            println!();
            return Ok(());
        };
        match flow.answer(guide, &line?) {
            Ok(FlowProgress::Continue(guidance)) => print_guidance(&guidance),
            Ok(FlowProgress::Complete(outcome)) => {
                println!();
                println!("{}", outcome.game_effect);
                println!();
                println!("{}", outcome.share_text);
                println!();
                println!("{}", serde_json::to_string_pretty(&outcome.configuration)?);
                return Ok(());
            }
            Err(FlowError::EmptyAnswer) => println!("請輸入孩子的回答。"),
            Err(e) => return Err(e.into()),
        }
    }
}

fn describe(configuration: &GameConfiguration) {
    let lexicon = default_lexicon();
    let resolved = lexicon.resolve_game(configuration);
    println!("{}", lexicon.describe_configuration(configuration));
    println!();
    let params = &resolved.params;
    println!(
        "{} {} → {}  difficulty={} spawn={}ms round={}s radius={} points={}",
        configuration.game_title,
        resolved.object.visual,
        resolved.catcher.visual,
        params.difficulty.label(),
        params.spawn_interval_ms,
        params.round_secs,
        params.catch_radius,
        params.points_per_catch,
    );
}

/// Move toward the lowest item still in flight, one key press per frame.
fn chase(scene: &CatchScene) -> SceneInput {
    let target = scene
        .items()
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .map(|item| item.x);
    match target {
        Some(x) if x < scene.catcher_x() - 2.0 => SceneInput::Left,
        Some(x) if x > scene.catcher_x() + 2.0 => SceneInput::Right,
        _ => SceneInput::Idle,
    }
}

fn play(
    configuration: &GameConfiguration,
    scene_config: SceneConfig,
    seed: u64,
    json: bool,
) -> Result<(), Box<dyn Error>> {
    const FRAME_MS: u64 = 16;

    let resolved = default_lexicon().resolve_game(configuration);
    let mut scene = CatchScene::new(resolved, scene_config, seed);
    let summary = loop {
        scene.step(FRAME_MS, chase(&scene));
        if let Some(summary) = scene.summary() {
            break *summary;
        }
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", end_message(scene.game(), &summary));
    }
    Ok(())
}
