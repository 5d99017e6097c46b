//! Wiring between the command line, `TodoClient` and the terminal.
//!
//! Every invocation loads the list first, applies the configured filter and
//! then runs one command (or, for `shell`, many), printing the screen after
//! each.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use todo_core::{TodoApi, TodoClient, TodoId};

use crate::config::{Cli, Command};
use crate::transport::HttpTransport;
use crate::view::TerminalView;

pub type Session = TodoClient<HttpTransport, TerminalView>;

pub fn session(base_url: &str) -> Session {
    TodoClient::new(
        TodoApi::new(base_url),
        HttpTransport::default(),
        TerminalView::default(),
    )
}

/// Run `cli` against its backend. `input` feeds the `shell` command.
pub async fn run<R, W>(cli: &Cli, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let mut client = session(&cli.base_url);
    client.load().await;
    client.set_filter_name(&cli.filter);

    match cli.command.clone().unwrap_or(Command::List) {
        Command::List => {}
        Command::Add { text } => add(&mut client, &text.join(" ")).await,
        Command::Toggle { id } => {
            if let Some(id) = resolve(&client, &id, out)? {
                client.toggle(&id).await;
            }
        }
        Command::Edit { id, text } => {
            if let Some(id) = resolve(&client, &id, out)? {
                edit(&mut client, &id, &text.join(" ")).await;
            }
        }
        Command::Rm { id } => {
            if let Some(id) = resolve(&client, &id, out)? {
                client.remove(&id).await;
            }
        }
        Command::ClearCompleted => client.clear_completed().await,
        Command::Shell => return shell(&mut client, input, out).await,
    }

    client.view().write_to(out)?;
    Ok(())
}

async fn add(client: &mut Session, text: &str) {
    client.view_mut().set_input(text);
    client.submit_input().await;
}

async fn edit(client: &mut Session, id: &TodoId, text: &str) {
    client.commit_edit(id, text).await;
    // Terminal rows are not edited in place, so show the stored text.
    client.render();
}

fn resolve<W: Write>(client: &Session, reference: &str, out: &mut W) -> Result<Option<TodoId>> {
    let id = client.view().resolve(reference);
    if id.is_none() {
        writeln!(out, "no row {reference}")?;
    }
    Ok(id)
}

const SHELL_HELP: &str = "\
commands:
  add <text>         add an item
  toggle <ref>       flip completed
  edit <ref> <text>  replace text
  rm <ref>           delete an item
  clear              delete completed items
  filter <name>      all, active or completed
  reload             fetch the list again
  list               show the list
  quit               leave
<ref> is an id or #N for the N-th shown row";

enum Flow {
    Continue,
    Quit,
}

async fn shell<R, W>(client: &mut Session, input: R, out: &mut W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    client.view().write_to(out)?;
    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;
        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            return Ok(());
        };
        if let Flow::Quit = shell_line(client, &line, out).await? {
            return Ok(());
        }
    }
}

async fn shell_line<W: Write>(client: &mut Session, line: &str, out: &mut W) -> Result<Flow> {
    let line = line.trim();
    let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim_start();
    debug!(command = word, "shell command");

    match word {
        "" => return Ok(Flow::Continue),
        "quit" | "exit" => return Ok(Flow::Quit),
        "help" => {
            writeln!(out, "{SHELL_HELP}")?;
            return Ok(Flow::Continue);
        }
        "list" => {}
        "reload" => client.load().await,
        "add" => add(client, rest).await,
        "clear" => client.clear_completed().await,
        "filter" => client.set_filter_name(rest),
        "toggle" | "rm" | "edit" => {
            let (reference, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let Some(id) = resolve(client, reference, out)? else {
                return Ok(Flow::Continue);
            };
            match word {
                "toggle" => client.toggle(&id).await,
                "rm" => client.remove(&id).await,
                _ => edit(client, &id, text).await,
            }
        }
        other => {
            writeln!(out, "unknown command {other:?}, try help")?;
            return Ok(Flow::Continue);
        }
    }

    client.view().write_to(out)?;
    Ok(Flow::Continue)
}
