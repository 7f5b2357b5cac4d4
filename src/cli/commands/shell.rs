//! `dca shell` command - an interactive session on one catalog table
//!
//! The session is the page: it mounts the seeded table, shows it, and turns
//! typed actions into modal and controller calls. On a terminal lines come
//! from a prompt; otherwise they are read from stdin (or `--script`), one
//! command per line, so sessions can be scripted.

use chrono::Local;
use console::style;
use dialoguer::{theme::ColorfulTheme, Input};
use miette::{IntoDiagnostic, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal, Write};
use std::path::PathBuf;
use std::rc::Rc;

use crate::cli::commands::export::write_export;
use crate::cli::commands::{mount, parse_kind, Mounted};
use crate::cli::helpers::{format_notification, format_validation_errors, split_words};
use crate::cli::table::{render, TableConfig};
use crate::cli::{GlobalOpts, OutputFormat};
use crate::core::export::{self, ExportError, ExportFormat};
use crate::core::notify::SubscriptionId;
use crate::core::{
    Config, CrudController, Draft, EntityKind, Geocoder, HttpGeocoder, ImportPipeline,
    ModalCoordinator, ModalState, Notification, NotificationCenter, NotificationKind, Notifier,
    RandomStatistics, Record, StatisticsProvider, Submitted,
};

#[derive(clap::Args, Debug)]
pub struct ShellArgs {
    /// Catalog to open
    #[arg(value_parser = parse_kind)]
    pub kind: EntityKind,

    /// Read commands from a file instead of the terminal
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,
}

const HELP: &[(&str, &str)] = &[
    ("list", "Show the table"),
    ("new", "Open the add form"),
    ("edit <id>", "Open the edit form for a record"),
    ("delete <id>", "Ask to delete a record"),
    ("set <field> <value>", "Fill a form field"),
    ("form", "Show the open form"),
    ("submit", "Save the open form"),
    ("confirm", "Confirm the pending delete"),
    ("cancel", "Close the open dialog without saving"),
    ("toggle <id>", "Activate or deactivate a record"),
    ("locate", "Fill coordinates from the form's address"),
    ("import <file>", "Add records from a CSV file"),
    ("export [csv|xls] [path]", "Write the table to a file"),
    ("stats <id>", "Order statistics for a record"),
    ("notifications", "Show recent notifications"),
    ("help", "Show this help"),
    ("quit", "Leave the session"),
];

/// Whether the session should keep reading
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// One mounted catalog table and the dialogs over it
pub struct Session<R: Record, W: Write> {
    controller: CrudController<R>,
    center: Rc<NotificationCenter>,
    pending: Rc<RefCell<Vec<Notification>>>,
    subscription: SubscriptionId,
    modal: ModalCoordinator<R>,
    pipeline: ImportPipeline,
    geocoder: Box<dyn Geocoder>,
    stats: Box<dyn StatisticsProvider>,
    config: Config,
    out: W,
}

impl<R: Record, W: Write> Session<R, W> {
    pub fn new(
        mounted: Mounted<R>,
        geocoder: Box<dyn Geocoder>,
        stats: Box<dyn StatisticsProvider>,
        config: Config,
        out: W,
    ) -> Self {
        let pending = Rc::new(RefCell::new(Vec::new()));
        let sink = pending.clone();
        let subscription = mounted
            .center
            .subscribe(move |n: &Notification| sink.borrow_mut().push(n.clone()));

        Self {
            controller: mounted.controller,
            center: mounted.center,
            pending,
            subscription,
            modal: ModalCoordinator::new(),
            pipeline: ImportPipeline::new(),
            geocoder,
            stats,
            config,
            out,
        }
    }

    pub fn controller(&self) -> &CrudController<R> {
        &self.controller
    }

    pub fn modal_state(&self) -> ModalState {
        self.modal.state()
    }

    /// Prompt text, naming the open dialog if any
    pub fn prompt(&self) -> String {
        match self.modal.state() {
            ModalState::Idle => R::KIND.plural().to_string(),
            ModalState::AddOpen => format!("{} [new]", R::KIND.plural()),
            ModalState::EditOpen(id) => format!("{} [edit #{}]", R::KIND.plural(), id),
            ModalState::DeleteConfirmOpen(id) => format!("{} [delete #{}?]", R::KIND.plural(), id),
        }
    }

    pub fn banner(&mut self) -> Result<()> {
        writeln!(
            self.out,
            "{} {} {}. Type {} for commands.",
            style(R::KIND.label()).bold(),
            style("catalog:").bold(),
            style(format!("{} records", self.controller.list().len())).cyan(),
            style("help").cyan()
        )
        .into_diagnostic()
    }

    /// Run one command line
    ///
    /// Mistakes (bad ids, wrong dialog, unknown commands) are reported on the
    /// output and the session goes on; only write failures are errors.
    pub fn execute(&mut self, line: &str) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let words = split_words(line);
        let Some((command, rest)) = words.split_first() else {
            return Ok(Flow::Continue);
        };
        tracing::debug!(command = %command, "shell command");

        let flow = self.dispatch(command, rest)?;
        self.flush()?;
        Ok(flow)
    }

    /// Close the session and hand back the output
    pub fn finish(mut self) -> Result<W> {
        self.flush()?;
        self.center.unsubscribe(self.subscription);
        self.center.shutdown();
        Ok(self.out)
    }

    fn dispatch(&mut self, command: &str, rest: &[String]) -> Result<Flow> {
        match command {
            "list" | "ls" => self.list()?,
            "new" | "add" => match self.modal.open_add() {
                Ok(()) => self.show_form()?,
                Err(e) => self.fail(&e.to_string())?,
            },
            "edit" => match id_arg(rest) {
                Ok(id) => match self.modal.open_edit(&self.controller, id) {
                    Ok(()) => self.show_form()?,
                    Err(e) => self.fail(&e.to_string())?,
                },
                Err(msg) => self.fail(&msg)?,
            },
            "delete" | "rm" => match id_arg(rest) {
                Ok(id) => self.open_delete(id)?,
                Err(msg) => self.fail(&msg)?,
            },
            "set" => self.set(rest)?,
            "form" => {
                if self.modal.form().is_some() {
                    self.show_form()?
                } else {
                    self.fail("No form is open")?
                }
            }
            "submit" | "save" => self.submit()?,
            "confirm" | "yes" => self.confirm()?,
            "cancel" | "close" => {
                if self.modal.is_idle() {
                    self.fail("Nothing to cancel")?
                } else {
                    self.modal.close();
                    writeln!(self.out, "Closed").into_diagnostic()?
                }
            }
            "toggle" => match id_arg(rest) {
                Ok(id) => self.toggle(id)?,
                Err(msg) => self.fail(&msg)?,
            },
            "locate" => self.locate()?,
            "import" => self.import(rest)?,
            "export" => self.export(rest)?,
            "stats" => match id_arg(rest) {
                Ok(id) => self.show_stats(id)?,
                Err(msg) => self.fail(&msg)?,
            },
            "notifications" => self.show_notifications()?,
            "help" | "?" => self.help()?,
            "quit" | "exit" | "q" => return Ok(Flow::Quit),
            other => self.fail(&format!(
                "Unknown command '{}'. Type 'help' for a list.",
                other
            ))?,
        }
        Ok(Flow::Continue)
    }

    fn list(&mut self) -> Result<()> {
        let records = self.controller.list();
        if records.is_empty() {
            return writeln!(self.out, "No {}.", R::KIND.plural()).into_diagnostic();
        }
        let table = render(records, OutputFormat::Table, &TableConfig::default())
            .map_err(|e| miette::miette!("{}", e))?;
        writeln!(self.out, "{}", table).into_diagnostic()
    }

    fn show_form(&mut self) -> Result<()> {
        let title = match self.modal.state() {
            ModalState::EditOpen(id) => format!("Edit {} #{}", R::KIND.label().to_lowercase(), id),
            _ => format!("New {}", R::KIND.label().to_lowercase()),
        };
        let Some(form) = self.modal.form() else {
            return Ok(());
        };

        writeln!(self.out, "{}", style(title).bold()).into_diagnostic()?;
        for field in <R::Draft as Draft>::FIELDS {
            let value = form.values.get(field).unwrap_or_default();
            let line = match form.errors.get(field) {
                Some(error) => format!("  {:<14} {} {} {}", field, value, style("✗").red(), error),
                None => format!("  {:<14} {}", field, value),
            };
            writeln!(self.out, "{}", line).into_diagnostic()?;
        }
        writeln!(
            self.out,
            "{}",
            style("set <field> <value>, then submit or cancel").dim()
        )
        .into_diagnostic()
    }

    fn open_delete(&mut self, id: u64) -> Result<()> {
        if let Err(e) = self.modal.open_delete(&self.controller, id) {
            return self.fail(&e.to_string());
        }
        let name = self
            .modal
            .target()
            .map(|r| r.name().to_string())
            .unwrap_or_default();
        writeln!(
            self.out,
            "Delete {} #{} \"{}\"? Type {} or {}.",
            R::KIND.label().to_lowercase(),
            id,
            name,
            style("confirm").red(),
            style("cancel").cyan()
        )
        .into_diagnostic()
    }

    fn set(&mut self, rest: &[String]) -> Result<()> {
        let Some((field, value)) = rest.split_first() else {
            return self.fail("Usage: set <field> <value>");
        };
        let value = value.join(" ");
        if let Err(e) = self.modal.set_field(field, &value) {
            return self.fail(&e.to_string());
        }

        let error = self
            .modal
            .form()
            .and_then(|f| f.errors.get(field).map(str::to_string));
        let line = match error {
            Some(error) => format!("  {} {}: {}", style("✗").red(), field, error),
            None => format!("  {} = {}", field, value),
        };
        writeln!(self.out, "{}", line).into_diagnostic()
    }

    fn submit(&mut self) -> Result<()> {
        match self.modal.submit(&mut self.controller) {
            Ok(Submitted::Saved(_)) | Ok(Submitted::Deleted(_)) => Ok(()),
            Ok(Submitted::Invalid(errors)) => {
                writeln!(self.out, "{}", style("Please fix:").yellow()).into_diagnostic()?;
                writeln!(self.out, "{}", format_validation_errors(&errors)).into_diagnostic()
            }
            Ok(Submitted::Gone) => self.fail(&format!(
                "The {} no longer exists",
                R::KIND.label().to_lowercase()
            )),
            Err(e) => self.fail(&e.to_string()),
        }
    }

    fn confirm(&mut self) -> Result<()> {
        match self.modal.confirm_delete(&mut self.controller) {
            Ok(Submitted::Gone) => self.fail(&format!(
                "The {} no longer exists",
                R::KIND.label().to_lowercase()
            )),
            Ok(_) => Ok(()),
            Err(e) => self.fail(&e.to_string()),
        }
    }

    fn toggle(&mut self, id: u64) -> Result<()> {
        match self.controller.get(id).map(|r| r.is_active()) {
            Some(active) => {
                self.controller.set_active(id, !active);
                Ok(())
            }
            None => self.fail(&format!("No {} #{}", R::KIND.label().to_lowercase(), id)),
        }
    }

    fn locate(&mut self) -> Result<()> {
        let fields = <R::Draft as Draft>::FIELDS;
        if !fields.contains(&"address") || !fields.contains(&"latitude") {
            return self.fail(&format!("{} have no location", R::KIND.plural()));
        }
        let Some(form) = self.modal.form() else {
            return self.fail("Open a new or edit form first");
        };
        let address = form.values.get("address").unwrap_or_default();

        let result = self.geocoder.geocode(&address);
        match result.coordinates {
            Some(c) => {
                self.modal
                    .set_field("latitude", &c.latitude.to_string())
                    .map_err(|e| miette::miette!("{}", e))?;
                self.modal
                    .set_field("longitude", &c.longitude.to_string())
                    .map_err(|e| miette::miette!("{}", e))?;
                writeln!(self.out, "  {} {}", style("located at").dim(), style(c).cyan())
                    .into_diagnostic()
            }
            None => {
                let reason = result.error.unwrap_or_else(|| "no result".to_string());
                self.center
                    .notify(&format!("Geocoding failed: {}", reason), NotificationKind::Error);
                Ok(())
            }
        }
    }

    fn import(&mut self, rest: &[String]) -> Result<()> {
        if rest.is_empty() {
            return self.fail("Usage: import <file>");
        }
        self.pipeline.select(rest.join(" "));
        // the pipeline reports the outcome as a notification
        if let Ok(summary) = self.pipeline.run(&mut self.controller) {
            if summary.skipped > 0 {
                writeln!(
                    self.out,
                    "  {} {} row(s) without a name skipped",
                    style("!").yellow(),
                    summary.skipped
                )
                .into_diagnostic()?;
            }
        }
        Ok(())
    }

    fn export(&mut self, rest: &[String]) -> Result<()> {
        let (format, path) = match rest.first().map(|s| s.parse::<ExportFormat>()) {
            Some(Ok(format)) => (format, rest.get(1).map(PathBuf::from)),
            Some(Err(_)) => {
                let path = PathBuf::from(&rest[0]);
                let format = match path.extension().and_then(|e| e.to_str()) {
                    Some(ext) => ext.parse().unwrap_or(ExportFormat::Csv),
                    None => self.config.default_format(),
                };
                (format, Some(path))
            }
            None => (self.config.default_format(), None),
        };

        let records = self.controller.list();
        let body = match export::export(records, format, R::KIND.label()) {
            Ok(body) => body,
            Err(ExportError::Empty) => {
                self.center.notify(
                    &format!("Nothing to export: no {}", R::KIND.plural()),
                    NotificationKind::Error,
                );
                return Ok(());
            }
            Err(e) => {
                self.center
                    .notify(&format!("Export failed: {}", e), NotificationKind::Error);
                return Ok(());
            }
        };
        let count = records.len();

        match write_export(R::KIND, format, &body, path.as_deref(), &self.config) {
            Ok(saved) => self.center.notify(
                &format!(
                    "Exported {} {} to {}",
                    count,
                    R::KIND.plural(),
                    saved.display()
                ),
                NotificationKind::Success,
            ),
            Err(e) => self
                .center
                .notify(&format!("Export failed: {}", e), NotificationKind::Error),
        }
        Ok(())
    }

    fn show_stats(&mut self, id: u64) -> Result<()> {
        let Some(record) = self.controller.get(id) else {
            return self.fail(&format!("No {} #{}", R::KIND.label().to_lowercase(), id));
        };
        let stats = self.stats.stats_for(id);
        writeln!(self.out, "{}", style(record.name()).bold()).into_diagnostic()?;
        writeln!(self.out, "  Orders today:       {}", stats.orders_today).into_diagnostic()?;
        writeln!(self.out, "  Orders this month:  {}", stats.orders_this_month).into_diagnostic()?;
        writeln!(self.out, "  Revenue this month: {} ₸", stats.revenue_this_month).into_diagnostic()?;
        writeln!(self.out, "  Average check:      {} ₸", stats.average_check()).into_diagnostic()
    }

    fn show_notifications(&mut self) -> Result<()> {
        let active = self.center.active();
        if active.is_empty() {
            return writeln!(self.out, "No notifications").into_diagnostic();
        }
        for n in &active {
            let at = n.created_at.with_timezone(&Local).format("%H:%M:%S");
            writeln!(self.out, "{} {}", style(at).dim(), format_notification(n)).into_diagnostic()?;
        }
        Ok(())
    }

    fn help(&mut self) -> Result<()> {
        writeln!(self.out, "{}", style("Commands:").bold()).into_diagnostic()?;
        for (usage, description) in HELP {
            writeln!(self.out, "  {:<26} {}", style(usage).cyan(), style(description).dim())
                .into_diagnostic()?;
        }
        writeln!(
            self.out,
            "{} {}",
            style("Fields:").bold(),
            <R::Draft as Draft>::FIELDS.join(", ")
        )
        .into_diagnostic()
    }

    fn fail(&mut self, message: &str) -> Result<()> {
        writeln!(self.out, "{} {}", style("✗").red(), message).into_diagnostic()
    }

    fn flush(&mut self) -> Result<()> {
        let pending: Vec<Notification> = self.pending.borrow_mut().drain(..).collect();
        for n in &pending {
            writeln!(self.out, "{}", format_notification(n)).into_diagnostic()?;
        }
        self.out.flush().into_diagnostic()
    }
}

fn id_arg(rest: &[String]) -> std::result::Result<u64, String> {
    match rest.first() {
        Some(raw) => raw
            .trim_start_matches('#')
            .parse()
            .map_err(|_| format!("'{}' is not an id", raw)),
        None => Err("An id is required".to_string()),
    }
}

pub fn run(args: ShellArgs, global: &GlobalOpts) -> Result<()> {
    with_record_type!(args.kind, R => run_session::<R>(&args, global))
}

fn run_session<R: Record>(args: &ShellArgs, global: &GlobalOpts) -> Result<()> {
    let config = Config::load();
    let mounted = mount::<R>(&config)?;
    let geocoder = HttpGeocoder::new(config.geocoder_url(), config.geocoder_user_agent())
        .map_err(|e| miette::miette!("Cannot set up geocoder: {}", e))?;
    let mut session = Session::new(
        mounted,
        Box::new(geocoder),
        Box::new(RandomStatistics::new()),
        config,
        io::stdout(),
    );

    if !global.quiet {
        session.banner()?;
    }

    let interactive = args.script.is_none() && io::stdin().is_terminal();
    if interactive {
        let theme = ColorfulTheme::default();
        loop {
            let line: String = Input::with_theme(&theme)
                .with_prompt(session.prompt())
                .allow_empty(true)
                .interact_text()
                .into_diagnostic()?;
            if session.execute(&line)? == Flow::Quit {
                break;
            }
        }
    } else {
        let reader: Box<dyn BufRead> = match &args.script {
            Some(path) => Box::new(BufReader::new(File::open(path).into_diagnostic()?)),
            None => Box::new(io::stdin().lock()),
        };
        for line in reader.lines() {
            let line = line.into_diagnostic()?;
            if session.execute(&line)? == Flow::Quit {
                break;
            }
        }
    }

    session.finish()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::{Clock, ManualClock};
    use crate::core::geocode::{StubGeocoder, DEFAULT_JITTER, DEFAULT_ORIGIN};
    use crate::core::seed;
    use crate::core::stats::{FixedStatistics, Stats};
    use crate::entities::{Brand, Point};
    use chrono::{Duration, TimeZone, Utc};
    use std::fs;
    use tempfile::tempdir;

    fn session<R: Record>() -> Session<R, Vec<u8>> {
        console::set_colors_enabled(false);
        let clock: Rc<dyn Clock> = Rc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2024, 1, 16, 9, 0, 0).unwrap(),
        ));
        let center = Rc::new(NotificationCenter::new(clock.clone(), Duration::seconds(5)));
        let store = seed::store::<R>().unwrap();
        let mounted = Mounted {
            controller: CrudController::new(store, clock, center.clone()),
            center,
        };
        let stats = FixedStatistics::new().with(
            1,
            Stats {
                orders_today: 4,
                orders_this_month: 120,
                revenue_this_month: 600_000,
            },
        );
        Session::new(
            mounted,
            Box::new(StubGeocoder::with_seed(DEFAULT_ORIGIN, DEFAULT_JITTER, 1)),
            Box::new(stats),
            Config::default(),
            Vec::new(),
        )
    }

    fn run<R: Record>(session: &mut Session<R, Vec<u8>>, lines: &[&str]) {
        for line in lines {
            session.execute(line).unwrap();
        }
    }

    fn output<R: Record>(session: Session<R, Vec<u8>>) -> String {
        String::from_utf8(session.finish().unwrap()).unwrap()
    }

    #[test]
    fn test_delete_add_export_scenario() {
        let tmp = tempdir().unwrap();
        let target = tmp.path().join("brands.csv");
        let mut s = session::<Brand>();

        run(
            &mut s,
            &[
                "delete 2",
                "confirm",
                "new",
                "set name Zara",
                "submit",
                &format!("export csv {}", target.display()),
            ],
        );
        assert_eq!(s.modal_state(), ModalState::Idle);
        let out = output(s);
        assert!(out.contains("Brand \"Prada\" deleted"));
        assert!(out.contains("Brand \"Zara\" created"));
        assert!(out.contains("Exported 3 brands"));

        let csv = fs::read_to_string(&target).unwrap();
        let csv = csv.strip_prefix('\u{feff}').unwrap();
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("id,name,isActive,createdAt,updatedAt"));
        let names: Vec<&str> = lines.map(|l| l.split(',').nth(1).unwrap()).collect();
        assert_eq!(names, vec!["Guchi", "Gloria Jeans", "Zara"]);
    }

    #[test]
    fn test_invalid_submit_keeps_form_open() {
        let mut s = session::<Brand>();
        run(&mut s, &["new", "set name   ", "submit"]);
        assert_eq!(s.modal_state(), ModalState::AddOpen);
        assert_eq!(s.controller().list().len(), 3);

        run(&mut s, &["edit 1"]);
        assert_eq!(s.modal_state(), ModalState::AddOpen);

        run(&mut s, &["cancel", "edit 1"]);
        assert_eq!(s.modal_state(), ModalState::EditOpen(1));

        let out = output(s);
        assert!(out.contains("name: is required"));
        assert!(out.contains("close the add dialog first"));
    }

    #[test]
    fn test_quoted_values_and_toggle() {
        let mut s = session::<Brand>();
        run(
            &mut s,
            &["edit 3", "set name \"Gloria  Jeans Kids\"", "submit", "toggle 3"],
        );
        let brand = s.controller().get(3).unwrap();
        assert_eq!(brand.name, "Gloria  Jeans Kids");
        assert!(!brand.is_active);
    }

    #[test]
    fn test_unknown_and_malformed_commands_do_not_stop_session() {
        let mut s = session::<Brand>();
        assert_eq!(s.execute("frobnicate").unwrap(), Flow::Continue);
        assert_eq!(s.execute("edit x").unwrap(), Flow::Continue);
        assert_eq!(s.execute("delete 99").unwrap(), Flow::Continue);
        assert_eq!(s.execute("confirm").unwrap(), Flow::Continue);
        assert_eq!(s.execute("# a comment").unwrap(), Flow::Continue);
        assert_eq!(s.execute("quit").unwrap(), Flow::Quit);

        let out = output(s);
        assert!(out.contains("Unknown command 'frobnicate'"));
        assert!(out.contains("'x' is not an id"));
        assert!(out.contains("no record with id 99"));
    }

    #[test]
    fn test_import_in_session() {
        let tmp = tempdir().unwrap();
        let file = tmp.path().join("brands.csv");
        fs::write(&file, "name\nZara\n,\nMango\n").unwrap();

        let mut s = session::<Brand>();
        run(&mut s, &[&format!("import {}", file.display())]);
        let ids: Vec<u64> = s.controller().list().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5]);

        run(&mut s, &["import /nope/missing.csv"]);
        assert_eq!(s.controller().list().len(), 5);

        let out = output(s);
        assert!(out.contains("Imported 2 brands"));
        assert!(out.contains("1 row(s) without a name skipped"));
        assert!(out.contains("Import failed"));
    }

    #[test]
    fn test_export_of_empty_table_notifies() {
        let mut s = session::<Brand>();
        run(&mut s, &["delete 1", "confirm", "delete 2", "confirm", "delete 3", "confirm"]);
        run(&mut s, &["export csv"]);
        assert!(output(s).contains("Nothing to export"));
    }

    #[test]
    fn test_locate_fills_point_coordinates() {
        let mut s = session::<Point>();
        run(
            &mut s,
            &[
                "new",
                "set name Esentai",
                "set address Al-Farabi Ave 77/8",
                "set cityId 1",
                "locate",
                "submit",
            ],
        );
        let point = s.controller().list().last().unwrap();
        assert_eq!(point.name, "Esentai");
        let c = point.coordinates().unwrap();
        assert!((c.latitude - DEFAULT_ORIGIN.latitude).abs() <= DEFAULT_JITTER);
        assert!((c.longitude - DEFAULT_ORIGIN.longitude).abs() <= DEFAULT_JITTER);
    }

    #[test]
    fn test_locate_needs_location_fields() {
        let mut s = session::<Brand>();
        run(&mut s, &["new", "locate"]);
        assert!(output(s).contains("brands have no location"));
    }

    #[test]
    fn test_stats_and_notifications() {
        let mut s = session::<Brand>();
        run(&mut s, &["stats 1", "toggle 2", "notifications"]);
        let out = output(s);
        assert!(out.contains("Average check:      5000 ₸"));
        assert!(out.contains("Brand \"Prada\" deactivated"));
    }

    #[test]
    fn test_prompt_follows_dialog() {
        let mut s = session::<Brand>();
        assert_eq!(s.prompt(), "brands");
        run(&mut s, &["delete 1"]);
        assert_eq!(s.prompt(), "brands [delete #1?]");
    }
}
