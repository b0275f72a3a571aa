mod config;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result, anyhow, bail};
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use platform_obs::{ObsConfig, init_tracing};
use products_hr::constraints;
use products_hr::form::{self, FieldMap};
use products_hr::view;
use products_hr::{
    Dashboard, EmployeeId, EmployeeList, EmployeeSlot, FileKv, ListSettings, ViewMode,
};
use tracing::{info, warn};

use crate::config::AppConfig;

type FileList = EmployeeList<EmployeeSlot<FileKv>>;

#[derive(Parser, Debug)]
#[command(name = "hr-console", version, about = "Employee records kept in a local storage slot")]
struct Cli {
    /// Directory holding the storage slots (overrides HR_DATA_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show one page of employees.
    List {
        #[arg(long, default_value_t = 1)]
        page: usize,
        #[arg(long, value_enum, default_value_t = Layout::List)]
        view: Layout,
    },
    /// Add a new employee.
    Add(NewEmployee),
    /// Edit an existing employee. The email address cannot be changed.
    Edit(EditEmployee),
    /// Delete an employee after confirmation.
    Delete {
        #[arg(long)]
        id: String,
        #[arg(long, short = 'y', help = "Skip the confirmation prompt")]
        yes: bool,
    },
    /// Show the editable list next to its list and table mirrors.
    Dashboard,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Layout {
    List,
    Table,
    Cards,
}

#[derive(Args, Debug)]
struct NewEmployee {
    #[arg(long)]
    first_name: String,
    #[arg(long)]
    last_name: String,
    #[arg(long, value_name = "YYYY-MM-DD")]
    employed: String,
    #[arg(long, value_name = "YYYY-MM-DD")]
    born: String,
    #[arg(long, help = "Format: +90 530 123 45 67")]
    phone: String,
    #[arg(long)]
    email: String,
    #[arg(long, help = "Analytics or Tech")]
    department: String,
    #[arg(long, help = "Junior, Medior or Senior")]
    position: String,
}

#[derive(Args, Debug)]
struct EditEmployee {
    #[arg(long)]
    id: String,
    #[arg(long)]
    first_name: Option<String>,
    #[arg(long)]
    last_name: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    employed: Option<String>,
    #[arg(long, value_name = "YYYY-MM-DD")]
    born: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    position: Option<String>,
}

impl NewEmployee {
    fn into_values(self) -> FieldMap {
        [
            (form::FIRST_NAME, self.first_name),
            (form::LAST_NAME, self.last_name),
            (form::DATE_OF_EMPLOYMENT, self.employed),
            (form::DATE_OF_BIRTH, self.born),
            (form::PHONE, self.phone),
            (form::EMAIL, self.email),
            (form::DEPARTMENT, self.department),
            (form::POSITION, self.position),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
    }
}

impl EditEmployee {
    fn apply(self, values: &mut FieldMap) {
        let changes = [
            (form::FIRST_NAME, self.first_name),
            (form::LAST_NAME, self.last_name),
            (form::DATE_OF_EMPLOYMENT, self.employed),
            (form::DATE_OF_BIRTH, self.born),
            (form::PHONE, self.phone),
            (form::DEPARTMENT, self.department),
            (form::POSITION, self.position),
        ];
        for (name, value) in changes {
            if let Some(value) = value {
                values.insert(name.to_string(), value);
            }
        }
    }
}

fn main() -> Result<()> {
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let mut config = AppConfig::load()?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    let settings = config.list_settings();

    match cli.command {
        Command::List { page, view } => show_page(&mut open_list(&config, &settings), page, view),
        Command::Add(args) => add(&mut open_list(&config, &settings), args),
        Command::Edit(args) => edit(&mut open_list(&config, &settings), args),
        Command::Delete { id, yes } => delete(&mut open_list(&config, &settings), id, yes),
        Command::Dashboard => dashboard(&config, settings),
    }
}

fn open_slot(config: &AppConfig, settings: &ListSettings) -> EmployeeSlot<FileKv> {
    EmployeeSlot::new(FileKv::new(&config.data_dir), settings.storage_slot.clone())
}

fn open_list(config: &AppConfig, settings: &ListSettings) -> FileList {
    EmployeeList::new(open_slot(config, settings), settings.clone())
}

fn show_page(list: &mut FileList, page: usize, layout: Layout) -> Result<()> {
    if list.total_pages() > 0 && !list.set_page(page) {
        warn!(page, total_pages = list.total_pages(), "no such page; showing page 1");
    }
    let rendered = match layout {
        Layout::Cards => view::render_cards(list.current_page_slice(), list.is_main_list()),
        Layout::List | Layout::Table => {
            let mode = if layout == Layout::Table {
                ViewMode::Table
            } else {
                ViewMode::List
            };
            list.set_view_mode(mode);
            view::render(
                list.current_page_slice(),
                list.effective_view_mode(),
                list.is_main_list(),
            )
        }
    };

    println!("Employee List");
    println!();
    if list.employees().is_empty() {
        println!("No employees yet.");
    } else {
        print!("{rendered}");
    }
    println!("{}", view::render_pagination(&list.page_controls()));
    println!(
        "Page {} of {} ({} employees)",
        list.current_page(),
        list.total_pages().max(1),
        list.employees().len()
    );
    Ok(())
}

fn ensure_widget_constraints(values: &FieldMap) -> Result<()> {
    let violations = constraints::check(values, Utc::now().date_naive());
    if violations.is_empty() {
        return Ok(());
    }
    let details: Vec<String> = violations.iter().map(|v| format!("  - {v}")).collect();
    bail!("employee form is incomplete:\n{}", details.join("\n"))
}

fn add(list: &mut FileList, args: NewEmployee) -> Result<()> {
    let values = args.into_values();
    ensure_widget_constraints(&values)?;

    list.begin_create();
    let id = list
        .submit_form(&values)
        .context("failed to save the new employee")?
        .ok_or_else(|| anyhow!("employee list is read-only"))?;
    info!(id = %id, "employee added");
    println!("Added employee {id}");
    Ok(())
}

fn edit(list: &mut FileList, args: EditEmployee) -> Result<()> {
    let id = EmployeeId::new(args.id.clone());
    let Some(existing) = list.find(&id).cloned() else {
        bail!("no employee with id {id}");
    };

    list.begin_edit(&existing);
    let mut values = list.form().prefill();
    args.apply(&mut values);
    ensure_widget_constraints(&values)?;

    match list
        .submit_form(&values)
        .context("failed to save the employee")?
    {
        Some(id) => println!("Updated employee {id}"),
        None => println!("Employee {id} was not changed"),
    }
    Ok(())
}

fn delete(list: &mut FileList, id: String, yes: bool) -> Result<()> {
    let id = EmployeeId::new(id);
    let Some(target) = list.find(&id).cloned() else {
        bail!("no employee with id {id}");
    };

    list.request_delete(&target);
    let gate = list.gate();
    let confirmed = yes || ask(gate.title(), gate.message().unwrap_or_default())?;

    if confirmed {
        if let Some(deleted) = list.proceed().context("failed to delete the employee")? {
            println!("Deleted employee {deleted}");
        }
    } else {
        list.dismiss();
        println!("Nothing deleted");
    }
    Ok(())
}

fn ask(title: &str, message: &str) -> Result<bool> {
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{title}")?;
    writeln!(stdout, "{message}")?;
    write!(stdout, "Proceed? [y/N] ")?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("failed to read confirmation")?;
    Ok(matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

fn dashboard(config: &AppConfig, settings: ListSettings) -> Result<()> {
    let store = Rc::new(open_slot(config, &settings));
    let dashboard = Dashboard::new(store, settings);
    print!("{}", dashboard.render());
    Ok(())
}
