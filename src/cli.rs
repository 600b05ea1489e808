//! Command line front end
//!
//! Each command drives the controller the way the UI would: open a view,
//! pick an article, fill in the form, submit.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::models::ArticleDraft;
use crate::routes::View;
use crate::services::{ArticleController, Outcome};

/// Quillpad article client
#[derive(Debug, Parser)]
#[command(name = "quillpad")]
#[command(about = "Manage articles on a remote articles API")]
#[command(version)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file
    #[arg(short, long, default_value = "quillpad.yml")]
    pub config: PathBuf,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Log in and store the session token
    Login {
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Forget the session token
    Logout,
    /// List articles
    List,
    /// Create an article
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        /// JavaScript, React or Node
        #[arg(long)]
        topic: String,
    },
    /// Edit an article; omitted fields keep their current value
    Update {
        article_id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        text: Option<String>,
        #[arg(long)]
        topic: Option<String>,
    },
    /// Delete an article
    Delete { article_id: i64 },
    /// Open a view by route path
    Open { path: String },
    /// Show the session phase
    Status,
}

/// Run one command against the controller
///
/// Errors are reserved for requests the controller can not express, such as
/// editing an article that is not in the list.
pub async fn run(command: Commands, controller: &mut ArticleController) -> Result<Outcome> {
    controller.restore_session().await;

    match command {
        Commands::Login { username, password } => {
            Ok(controller.login(&username, &password).await)
        }
        Commands::Logout => Ok(controller.logout().await),
        Commands::List => Ok(controller.navigate(View::Articles).await),
        Commands::Create { title, text, topic } => {
            let outcome = controller.navigate(View::Articles).await;
            if !outcome.is_completed() {
                return Ok(outcome);
            }
            controller.cancel_edit();
            Ok(controller
                .submit_form(ArticleDraft::new(title, text, topic))
                .await)
        }
        Commands::Update {
            article_id,
            title,
            text,
            topic,
        } => {
            let outcome = controller.navigate(View::Articles).await;
            if !outcome.is_completed() {
                return Ok(outcome);
            }
            controller.select_article(Some(article_id));

            let mut form = controller.form();
            if form.editing() != Some(article_id) {
                controller.cancel_edit();
                anyhow::bail!("Article {} is not in the list", article_id);
            }
            let values = form.values_mut();
            if let Some(title) = title {
                values.title = title;
            }
            if let Some(text) = text {
                values.text = text;
            }
            if let Some(topic) = topic {
                values.topic = topic;
            }
            let outcome = controller.submit(form.take_request()).await;
            controller.cancel_edit();
            Ok(outcome)
        }
        Commands::Delete { article_id } => {
            let outcome = controller.navigate(View::Articles).await;
            if !outcome.is_completed() {
                return Ok(outcome);
            }
            Ok(controller.delete_article(article_id).await)
        }
        Commands::Open { path } => Ok(controller.navigate(View::from_path(&path)).await),
        Commands::Status => {
            tracing::info!("Session {}", controller.phase());
            Ok(Outcome::Completed)
        }
    }
}
