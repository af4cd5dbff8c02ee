//! Interactive shell.
//!
//! Reads one command per line from stdin. Supplier fetches run in the
//! background; their results are printed between commands as they arrive.
//! On `quit` or end of input the shell waits for fetches still in flight.

use std::path::Path;

use secrecy::SecretString;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::task::JoinHandle;
use wardrobe_inventory::Inventory;
use wardrobe_inventory::models::ProductDraft;
use wardrobe_inventory::services::{BulkFetcher, FetchOutcome, Session};

use super::{CliError, products};
use crate::{Credentials, output};

/// File `import` reads when no path is given.
pub const DEFAULT_IMPORT_FILE: &str = "products_load.json";

const PROMPT: &str = "wardrobe> ";
const ADD_USAGE: &str = "add name | category | price | quantity | description";
const UPDATE_USAGE: &str = "update <id> name | category | price | quantity | description";
const GENERATE_USAGE: &str = "generate [count]";

const HELP: &str = "\
Commands:
  list                      List every product
  search <term>             Search name, category and description
  show <id>                 Show one product
  add name | category | price | quantity | description
  update <id> name | category | price | quantity | description
  delete <id>               Delete a product
  generate [count]          Fetch up to 1000 products from the supplier feed in the background
  import [file]             Append products from a JSON file (default: products_load.json)
  whoami                    Show the logged-in account
  help                      Show this list
  quit                      Leave the shell";

/// What the loop does after a command.
#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns `CliError` if the data files cannot be created, login with
/// explicit credentials fails, or stdin cannot be read.
pub async fn run(inventory: &Inventory, credentials: Credentials) -> Result<(), CliError> {
    inventory.initialize()?;
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    let Some(session) = login(inventory, credentials, &mut lines).await? else {
        return Ok(());
    };
    output::banner(&session);

    let (fetcher, mut completions) = inventory.bulk_fetcher();
    let mut pending: Vec<JoinHandle<()>> = Vec::new();

    output::prompt(PROMPT);
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                pending.retain(|handle| !handle.is_finished());
                match execute(inventory, &session, &fetcher, &mut pending, &line) {
                    Ok(Flow::Quit) => break,
                    Ok(Flow::Continue) => {}
                    Err(e) => output::error(&e),
                }
                output::prompt(PROMPT);
            }
            Some(outcome) = completions.recv() => {
                output::line("");
                report(outcome);
                output::prompt(PROMPT);
            }
        }
    }

    if !pending.is_empty() {
        output::line("Waiting for supplier fetches to finish...");
    }
    for handle in pending {
        handle.await?;
    }
    while let Ok(outcome) = completions.try_recv() {
        report(outcome);
    }
    Ok(())
}

/// Log in with whatever credentials were given, prompting for the rest.
///
/// With both values given a failed login is an error. Otherwise the user is
/// asked again until login succeeds or input ends (`None`).
async fn login<R>(
    inventory: &Inventory,
    credentials: Credentials,
    lines: &mut Lines<R>,
) -> Result<Option<Session>, CliError>
where
    R: AsyncBufRead + Unpin,
{
    if credentials.username.is_some() && credentials.password.is_some() {
        return super::login(inventory, credentials).map(Some);
    }

    loop {
        let username = match &credentials.username {
            Some(username) => username.clone(),
            None => match read_field(lines, "Username: ").await? {
                Some(username) => username,
                None => return Ok(None),
            },
        };
        let password = match &credentials.password {
            Some(password) => password.clone(),
            None => match read_field(lines, "Password: ").await? {
                Some(password) => password,
                None => return Ok(None),
            },
        };

        match inventory
            .auth()
            .login(&username, &SecretString::from(password))
        {
            Ok(session) => return Ok(Some(session)),
            Err(e) => output::error(&e),
        }
    }
}

async fn read_field<R>(lines: &mut Lines<R>, label: &str) -> Result<Option<String>, CliError>
where
    R: AsyncBufRead + Unpin,
{
    output::prompt(label);
    Ok(lines.next_line().await?)
}

/// Run one shell line.
fn execute(
    inventory: &Inventory,
    session: &Session,
    fetcher: &BulkFetcher,
    pending: &mut Vec<JoinHandle<()>>,
    line: &str,
) -> Result<Flow, CliError> {
    let line = line.trim();
    let (command, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(command, rest)| (command, rest.trim()));

    match command {
        "" => {}
        "list" => products::list(inventory, session),
        "search" => products::search(inventory, session, rest),
        "show" => products::show(inventory, session, rest)?,
        "add" => products::add(inventory, session, &parse_draft(rest, ADD_USAGE)?)?,
        "update" => {
            let (id, fields) = rest
                .split_once(char::is_whitespace)
                .ok_or(CliError::Usage(UPDATE_USAGE))?;
            products::update(inventory, session, id, &parse_draft(fields, UPDATE_USAGE)?)?;
        }
        "delete" => products::delete(inventory, session, rest)?,
        "generate" => {
            let count = if rest.is_empty() {
                inventory.config().fetch_count
            } else {
                rest.parse().map_err(|_| CliError::Usage(GENERATE_USAGE))?
            };
            let count = super::check_fetch_count(count)?;
            pending.push(fetcher.spawn(session, count)?);
            output::line(&format!(
                "Fetching {count} products from the supplier feed..."
            ));
        }
        "import" => {
            let file = if rest.is_empty() { DEFAULT_IMPORT_FILE } else { rest };
            products::import(inventory, session, Path::new(file))?;
        }
        "whoami" => output::whoami(session),
        "help" => output::line(HELP),
        "quit" | "exit" => return Ok(Flow::Quit),
        other => return Err(CliError::UnknownCommand(other.to_string())),
    }
    Ok(Flow::Continue)
}

/// Split `name | category | price | quantity | description`.
///
/// The description is optional and may itself contain `|`.
fn parse_draft(text: &str, usage: &'static str) -> Result<ProductDraft, CliError> {
    let mut parts = text.split('|').map(str::trim);
    let mut next = || parts.next().map(str::to_string).ok_or(CliError::Usage(usage));
    let name = next()?;
    let category = next()?;
    let price = next()?;
    let quantity = next()?;
    let description = parts.collect::<Vec<_>>().join(" | ");

    Ok(ProductDraft {
        name,
        category,
        price,
        quantity,
        description,
    })
}

fn report(outcome: FetchOutcome) {
    match outcome {
        Ok(report) => output::fetch_report(&report),
        Err(e) => output::error(&e),
    }
}
