use anyhow::{Context, Result};
use catalog::{options, AgeRating, Axis, Category, Era, Genre, Length, MovieFeatures, UserRating};
use clap::{Parser, Subcommand};
use colored::Colorize;
use recommender::{ForestConfig, Prediction, Recommender, TrainingReport};
use server::ServerConfig;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Instant;

/// movie-ml - Will the user watch this movie?
#[derive(Parser)]
#[command(name = "movie-ml")]
#[command(about = "Random forest movie watch predictor trained on 20 hand-made examples", long_about = None)]
struct Cli {
    /// TOML file with a [model] table of forest settings
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the forest seed
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Override the number of trees
    #[arg(long, global = true)]
    trees: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train the model and show the training table and accuracy
    Train,

    /// Predict whether a movie will be watched
    Predict {
        /// Genre (name or code)
        #[arg(long, default_value = "action")]
        genre: Genre,

        /// Age rating (name or code)
        #[arg(long, default_value = "pg-13")]
        age_rating: AgeRating,

        /// Movie length (name or code)
        #[arg(long, default_value = "medium")]
        length: Length,

        /// Release era (name or code)
        #[arg(long, default_value = "modern")]
        era: Era,

        /// User rating (name or code)
        #[arg(long, default_value = "good")]
        user_rating: UserRating,

        /// Print the prediction as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the interactive web form
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Maximum number of live sessions
        #[arg(long, default_value_t = server::SessionStore::DEFAULT_MAX_SESSIONS)]
        max_sessions: usize,
    },

    /// List every axis with its codes and labels
    Options,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Train => handle_train(config)?,
        Commands::Predict {
            genre,
            age_rating,
            length,
            era,
            user_rating,
            json,
        } => {
            let features = MovieFeatures::new(genre, age_rating, length, era, user_rating);
            handle_predict(config, features, json)?
        }
        Commands::Serve { addr, max_sessions } => {
            server::serve(ServerConfig {
                addr,
                max_sessions,
                forest: config,
            })
            .await?
        }
        Commands::Options => handle_options(),
    }

    Ok(())
}

/// Read the config file if given, then apply flag overrides
fn load_config(cli: &Cli) -> Result<ForestConfig> {
    let mut config = match &cli.config {
        Some(path) => ForestConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ForestConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    if let Some(trees) = cli.trees {
        config = config.with_estimators(trees);
    }
    config.validate().context("Invalid model configuration")?;
    Ok(config)
}

fn train(config: ForestConfig) -> Result<(Recommender, TrainingReport)> {
    let start = Instant::now();
    let mut recommender = Recommender::new(config);
    let report = recommender.train().context("Failed to train model")?;
    println!(
        "{} Trained {} trees in {:?}",
        "✓".green(),
        recommender.model_info().n_estimators,
        start.elapsed()
    );
    Ok((recommender, report))
}

/// Handle the 'train' command
fn handle_train(config: ForestConfig) -> Result<()> {
    let (_, report) = train(config)?;
    print_training_table(&report);
    Ok(())
}

/// Handle the 'predict' command
fn handle_predict(config: ForestConfig, features: MovieFeatures, json: bool) -> Result<()> {
    let (recommender, report) = train(config)?;
    let prediction = recommender
        .predict_features(&features)
        .context("Failed to make prediction")?;

    if json {
        let output = serde_json::json!({
            "selection": features,
            "label": prediction.outcome.label(),
            "probabilities": prediction.probabilities,
            "confidence": prediction.confidence(),
            "training_accuracy": report.accuracy,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_prediction(&features, &prediction);
    }
    Ok(())
}

/// Handle the 'options' command
fn handle_options() {
    for axis in Axis::ALL {
        println!("{}", axis.title().bold().blue());
        for (code, label) in options(axis) {
            println!("  {} {}", code.to_string().green(), label);
        }
    }
}

fn print_training_table(report: &TrainingReport) {
    println!("{}", "Training Data".bold().blue());
    println!(
        "{:>3}  {:<8} {:<6} {:<10} {:<8} {:<10} {}",
        "#", "Genre", "Age", "Length", "Era", "Rating", "Output"
    );
    for row in &report.table {
        let features = &row.features;
        let outcome = if row.outcome.is_will_watch() {
            row.outcome.label().green()
        } else {
            row.outcome.label().red()
        };
        println!(
            "{:>3}  {:<8} {:<6} {:<10} {:<8} {:<10} {}",
            row.id,
            features.genre.label(),
            features.age_rating.label(),
            features.length.label(),
            features.era.label(),
            features.user_rating.label(),
            outcome
        );
    }
    println!(
        "{} Model Accuracy: {:.1}% ({}/{} on training data)",
        "🎯".green(),
        report.accuracy * 100.0,
        report.correct,
        report.total
    );
}

fn print_prediction(features: &MovieFeatures, prediction: &Prediction) {
    println!("{} {}", "Current Selection:".bold(), features);
    if prediction.will_watch() {
        println!(
            "{} {} - This movie is recommended!",
            "✅".green(),
            prediction.outcome.label().bold().green()
        );
    } else {
        println!(
            "{} {} - This movie is not recommended",
            "❌".red(),
            prediction.outcome.label().bold().red()
        );
    }
    println!("Confidence: {:.1}%", prediction.confidence() * 100.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_predict_defaults() {
        let cli = Cli::try_parse_from(["movie-ml", "predict"]).unwrap();
        match cli.command {
            Commands::Predict {
                genre,
                age_rating,
                length,
                era,
                user_rating,
                json,
            } => {
                let features = MovieFeatures::new(genre, age_rating, length, era, user_rating);
                assert_eq!(features, MovieFeatures::default());
                assert!(!json);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_predict_accepts_names_and_codes() {
        let cli = Cli::try_parse_from([
            "movie-ml",
            "predict",
            "--genre",
            "horror",
            "--age-rating",
            "18+",
            "--length",
            "very-long",
            "--era",
            "1",
            "--user-rating",
            "Excellent",
        ])
        .unwrap();
        match cli.command {
            Commands::Predict {
                genre,
                age_rating,
                length,
                era,
                user_rating,
                ..
            } => {
                assert_eq!(genre, Genre::Horror);
                assert_eq!(age_rating, AgeRating::EighteenPlus);
                assert_eq!(length, Length::VeryLong);
                assert_eq!(era, Era::Classic);
                assert_eq!(user_rating, UserRating::Excellent);
            }
            _ => panic!("expected predict"),
        }
    }

    #[test]
    fn test_rejects_unknown_category() {
        assert!(Cli::try_parse_from(["movie-ml", "predict", "--genre", "western"]).is_err());
        assert!(Cli::try_parse_from(["movie-ml", "predict", "--length", "5"]).is_err());
    }

    #[test]
    fn test_flag_overrides() {
        let cli = Cli::try_parse_from(["movie-ml", "--seed", "9", "--trees", "15", "train"]).unwrap();
        let config = load_config(&cli).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.n_estimators, 15);
    }

    #[test]
    fn test_zero_trees_rejected() {
        let cli = Cli::try_parse_from(["movie-ml", "train", "--trees", "0"]).unwrap();
        assert!(load_config(&cli).is_err());
    }
}
