pub mod cli;
pub mod commands;
pub mod config;
pub mod datastore;
pub mod render;

use std::ffi::OsString;
use std::io;

use anyhow::Context;
use clap::Parser;
use jarvis_shared::{
  Board,
  TaskStore
};
use tracing::{
  debug,
  info
};

#[tracing::instrument(skip_all)]
pub fn run(
  raw_args: Vec<OsString>
) -> anyhow::Result<()> {
  let cli =
    cli::GlobalCli::parse_from(raw_args);

  cli::init_tracing(
    cli.verbose,
    cli.quiet
  )?;

  info!(
    verbose = cli.verbose,
    quiet = cli.quiet,
    "starting jarvis CLI"
  );
  debug!(command = ?cli.command, "parsed command");

  let mut cfg = config::Config::load(
    cli.jarvisrc.as_deref()
  )?;
  cfg.apply_overrides(
    cli
      .rc_overrides
      .into_iter()
      .map(|kv| (kv.key, kv.value))
  );

  let data_dir =
    config::resolve_data_dir(
      &cfg,
      cli.data.as_deref()
    )
    .context(
      "failed to resolve data \
       directory"
    )?;

  let backend =
    datastore::FileStore::open(
      &data_dir
    )
    .with_context(|| {
      format!(
        "failed to open task storage \
         at {}",
        data_dir.display()
      )
    })?;

  let mut board = Board::new(
    TaskStore::with_key(
      backend,
      cfg.storage_key()
    )
  );
  let renderer =
    render::Renderer::new(&cfg)?;

  let mut out = io::stdout().lock();
  commands::dispatch(
    &mut board,
    &renderer,
    cli.command.unwrap_or_default(),
    &mut out
  )?;

  info!("done");
  Ok(())
}
