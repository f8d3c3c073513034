use crate::libs::config::Config;
use crate::web;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Address to listen on, overriding the configuration
    #[arg(short, long)]
    bind: Option<String>,
}

pub async fn cmd(args: ServeArgs) -> Result<()> {
    let mut config = Config::read()?;
    if let Some(bind) = args.bind {
        config.bind = bind;
    }
    web::serve(config).await
}
