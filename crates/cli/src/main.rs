//! TaskDeck interactive terminal client
//!
//! Thin presentation layer over `td-core`: parses commands, renders the
//! session and collection snapshots, and obtains the explicit delete
//! confirmation that the controller itself does not impose.

use std::io::Write;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use td_core::{
    ApiClient, Backend, Config, SessionManager, Task, TaskId, TaskSyncController,
};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "td_cli=info,td_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let backend: Arc<dyn Backend> = Arc::new(ApiClient::new(Config::default()));
    let session = Arc::new(SessionManager::new(Arc::clone(&backend)));
    let controller = TaskSyncController::new(backend, Arc::clone(&session));

    println!("TaskDeck -- type 'help' for commands.");
    print_status(&session).await;

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    prompt();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        let (command, rest) = split_command(line);

        match command {
            "" => {}
            "help" => print_help(),
            "status" => print_status(&session).await,
            "login" => {
                let mut parts = rest.split_whitespace();
                match (parts.next(), parts.next()) {
                    (Some(username), Some(password)) => {
                        match session.login(username, password).await {
                            Ok(_) => {
                                print_status(&session).await;
                                match controller.refresh().await {
                                    Ok(tasks) => render_tasks(&tasks),
                                    Err(err) => println!("could not load tasks: {err}"),
                                }
                            }
                            Err(_) => print_status(&session).await,
                        }
                    }
                    _ => println!("usage: login <username> <password>"),
                }
            }
            "logout" => {
                session.logout().await;
                controller.clear().await;
                print_status(&session).await;
            }
            "list" => render_tasks(&controller.tasks().await),
            "refresh" => match controller.refresh().await {
                Ok(tasks) => render_tasks(&tasks),
                Err(err) => println!("refresh failed: {err}"),
            },
            "add" => {
                let (title, description) = match rest.split_once(" :: ") {
                    Some((title, description)) => (title.trim(), description.trim()),
                    None => (rest, ""),
                };
                match controller.create(title, description).await {
                    Ok(()) => render_tasks(&controller.tasks().await),
                    Err(err) => println!("could not create task: {err}"),
                }
            }
            "toggle" => match parse_id(rest) {
                Some(id) => {
                    let task = controller.tasks().await.iter().find(|t| t.id == id).cloned();
                    match task {
                        Some(task) => match controller.toggle(&task).await {
                            Ok(()) => render_tasks(&controller.tasks().await),
                            Err(err) => println!("could not update task: {err}"),
                        },
                        None => println!("no task with id {id}; try 'refresh'"),
                    }
                }
                None => println!("usage: toggle <id>"),
            },
            "rm" => match parse_id(rest) {
                Some(id) => {
                    print!("Delete task {id}? [y/N] ");
                    std::io::stdout().flush().ok();
                    let confirmed = matches!(
                        lines.next_line().await?.as_deref().map(str::trim),
                        Some("y") | Some("Y") | Some("yes")
                    );
                    if confirmed {
                        match controller.delete(id).await {
                            Ok(()) => render_tasks(&controller.tasks().await),
                            Err(err) => println!("could not delete task: {err}"),
                        }
                    } else {
                        println!("not deleted");
                    }
                }
                None => println!("usage: rm <id>"),
            },
            "quit" | "exit" => break,
            other => println!("unknown command '{other}'; type 'help'"),
        }

        prompt();
    }

    Ok(())
}

fn split_command(line: &str) -> (&str, &str) {
    match line.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    }
}

fn parse_id(input: &str) -> Option<TaskId> {
    input.trim().parse().ok()
}

fn prompt() {
    print!("> ");
    std::io::stdout().flush().ok();
}

async fn print_status(session: &SessionManager) {
    println!("status: {}", session.state().await.status_message);
}

fn render_tasks(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("(no tasks)");
        return;
    }

    println!("Your tasks ({}):", tasks.len());
    for task in tasks {
        let marker = if task.completed { "x" } else { " " };
        println!("  [{marker}] #{} {}", task.id, task.title);
        if !task.description_text().is_empty() {
            println!("        {}", task.description_text());
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  login <username> <password>   authenticate against the backend");
    println!("  logout                        drop the session and the task list");
    println!("  list                          show the currently held tasks");
    println!("  refresh                       refetch the task list from the backend");
    println!("  add <title> [:: <description>]  create a task");
    println!("  toggle <id>                   flip a task's completion state");
    println!("  rm <id>                       delete a task (asks for confirmation)");
    println!("  status                        show the session status message");
    println!("  quit                          exit");
}
