mod args;

use crate::args::{Args, Command};
use bloglist::catalog::Catalog;
use bloglist::config::Config;
use bloglist::error::{Error, Result};
use bloglist::script::{self, Step};
use bloglist::session::Session;
use clap::Parser;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tokio::sync::mpsc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();
    log::debug!("{:?}", args);
    let config = args.config()?;
    log::debug!("{:?}", config.listing);

    match &args.command {
        Command::Run { script, out } => run(&config, script.as_deref(), out.as_deref()).await,
        Command::Catalog => catalog(&config),
    }
}

async fn run(config: &Config, script: Option<&Path>, out: Option<&Path>) -> Result<()> {
    let text = read_script(script).await?;
    let steps = script::parse(text.as_str())?;
    log::info!("replaying {} steps", steps.len());

    let mut session = Session::start(config)?;
    let (tx, rx) = mpsc::channel(16);

    let feeder = tokio::spawn(async move {
        for step in steps {
            match step {
                Step::Send(event) => {
                    if tx.send(event).await.is_err() {
                        break;
                    }
                }
                Step::Wait(delay) => tokio::time::sleep(delay).await,
            }
        }
    });

    session.run(rx).await;
    if let Err(error) = feeder.await {
        log::error!("{}", error);
    }

    match out {
        Some(path) => {
            let file = File::create(path).map_err(Error::Io)?;
            session.render_to_write(BufWriter::new(file))?;
            log::info!("wrote {:?}", path);
        }
        None => print!("{}", session.render()?),
    }

    Ok(())
}

async fn read_script(path: Option<&Path>) -> Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(Error::Io),
        None => {
            let mut text = String::new();
            tokio::io::stdin()
                .read_to_string(&mut text)
                .await
                .map_err(Error::Io)?;
            Ok(text)
        }
    }
}

fn catalog(config: &Config) -> Result<()> {
    let catalog = Catalog::new(config.catalog.clone());
    for (i, post) in catalog.posts().iter().enumerate() {
        println!(
            "{:>3}  {:<16} {} ({}, {})",
            i + 1,
            post.category,
            post.title,
            post.author.name,
            post.author.date
        );
    }

    Ok(())
}
