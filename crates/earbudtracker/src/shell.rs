//! Interactive text menu for earbudtracker.
//!
//! The shell reads commands line by line and drives a [`RecordStore`]. It is
//! generic over its input and output so tests can script a whole session with
//! in-memory buffers.
//!
//! Unusable input is reported and re-prompted; only I/O failures end a session
//! with an error. End of input behaves like choosing "Exit".

use std::io::{BufRead, Write};

use tracing::{debug, info, warn};

use crate::config::ShellConfig;
use crate::error::{Error, Result};
use crate::record::RecordId;
use crate::store::{RecordStore, SearchFilter};

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainMenu {
    /// Report a pair of earbuds as lost.
    ReportLost,
    /// Mark a lost pair as found.
    ReportFound,
    /// Open the search sub-menu.
    Search,
    /// Leave the program.
    Exit,
}

impl MainMenu {
    /// Parse a main-menu selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the input is empty, not a number, or
    /// not between 1 and 4.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::invalid_input("Please enter a number between 1 and 4."));
        }
        let choice: i64 = input
            .parse()
            .map_err(|_| Error::invalid_input("Please enter a valid number."))?;
        match choice {
            1 => Ok(Self::ReportLost),
            2 => Ok(Self::ReportFound),
            3 => Ok(Self::Search),
            4 => Ok(Self::Exit),
            _ => Err(Error::invalid_input(
                "Invalid option. Please enter a number between 1 and 4.",
            )),
        }
    }
}

/// An entry of the search sub-menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMenu {
    /// Filter lost records by brand and color.
    ByBrandColor,
    /// Show the most recent lost reports.
    Recent,
}

impl SearchMenu {
    /// Parse a search sub-menu selection.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for anything other than `1` or `2`.
    pub fn parse(input: &str) -> Result<Self> {
        match input.trim() {
            "1" => Ok(Self::ByBrandColor),
            "2" => Ok(Self::Recent),
            _ => Err(Error::invalid_input("Invalid option. Please try again.")),
        }
    }
}

/// Outcome of a "report found" selection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The user entered `0`.
    Cancel,
    /// Zero-based index into the listed items.
    Item(usize),
}

/// Parse a 1-based selection from a list of `count` items, `0` meaning cancel.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] if the input is not a number or is out of
/// range.
pub fn parse_selection(input: &str, count: usize) -> Result<Selection> {
    let out_of_range = || Error::invalid_input(format!("Please enter a number between 0 and {count}."));
    let choice: i64 = input
        .trim()
        .parse()
        .map_err(|_| Error::invalid_input("Please enter a valid number."))?;
    if choice == 0 {
        return Ok(Selection::Cancel);
    }
    let index = usize::try_from(choice).map_err(|_| out_of_range())?;
    if index > count {
        return Err(out_of_range());
    }
    Ok(Selection::Item(index - 1))
}

/// The interactive menu loop.
#[derive(Debug)]
pub struct Shell<'a, R, W> {
    store: &'a mut RecordStore,
    config: &'a ShellConfig,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Shell<'a, R, W> {
    /// Create a shell over the given store and terminal streams.
    pub fn new(store: &'a mut RecordStore, config: &'a ShellConfig, input: R, output: W) -> Self {
        Self {
            store,
            config,
            input,
            output,
        }
    }

    /// Run the menu until the user exits or input ends.
    ///
    /// # Errors
    ///
    /// Returns an error only if reading input or writing output fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("Choose an option (1-4): ")? else {
                debug!("input closed, exiting");
                break;
            };

            match MainMenu::parse(&line) {
                Ok(MainMenu::ReportLost) => self.report_lost()?,
                Ok(MainMenu::ReportFound) => self.report_found()?,
                Ok(MainMenu::Search) => self.search()?,
                Ok(MainMenu::Exit) => break,
                Err(Error::InvalidInput { message }) => writeln!(self.output, "{message}")?,
                Err(e) => return Err(e),
            }
        }

        writeln!(self.output, "Thank you for using Earbud Tracker!")?;
        let stats = self.store.stats();
        info!(
            total = stats.total,
            lost = stats.lost,
            found = stats.found,
            oldest = ?stats.oldest,
            newest = ?stats.newest,
            "session ended"
        );
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        if self.config.show_banner {
            writeln!(self.output, "\n=== Earbud Tracker ===")?;
        }
        writeln!(self.output, "1. Report Lost Earbuds")?;
        writeln!(self.output, "2. Report Found Earbuds")?;
        writeln!(self.output, "3. Search for Lost Earbuds")?;
        writeln!(self.output, "4. Exit")?;
        Ok(())
    }

    /// Write a prompt and read one line, without its line terminator.
    ///
    /// Returns `None` at end of input.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{text}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let trimmed = line.trim_end_matches(['\n', '\r']).len();
        line.truncate(trimmed);
        Ok(Some(line))
    }

    fn report_lost(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Report Lost Earbuds ===")?;
        let Some(brand) = self.prompt("Enter brand: ")? else {
            return Ok(());
        };
        let Some(color) = self.prompt("Enter color: ")? else {
            return Ok(());
        };
        let Some(location) = self.prompt("Enter location where lost: ")? else {
            return Ok(());
        };

        let record = self.store.create(brand, color, location);
        writeln!(
            self.output,
            "\nEarbuds reported as lost. Here are the details:"
        )?;
        writeln!(
            self.output,
            "{}",
            record.details(&self.config.timestamp_format)
        )?;
        Ok(())
    }

    fn report_found(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Report Found Earbuds ===")?;
        let lost: Vec<(RecordId, String)> = self
            .store
            .lost()
            .map(|record| (record.id(), record.summary()))
            .collect();
        if lost.is_empty() {
            writeln!(self.output, "No lost earbuds in the system.")?;
            return Ok(());
        }

        writeln!(self.output, "Select which earbuds were found:")?;
        for (n, (_, summary)) in lost.iter().enumerate() {
            writeln!(self.output, "{}. {summary}", n + 1)?;
        }

        let index = loop {
            let Some(line) = self.prompt("Enter the number (or 0 to cancel): ")? else {
                return Ok(());
            };
            match parse_selection(&line, lost.len()) {
                Ok(Selection::Cancel) => {
                    writeln!(self.output, "Cancelled.")?;
                    return Ok(());
                }
                Ok(Selection::Item(index)) => break index,
                Err(Error::InvalidInput { message }) => writeln!(self.output, "{message}")?,
                Err(e) => return Err(e),
            }
        };

        let id = lost[index].0;
        match self.store.mark_found(id) {
            Ok(record) => {
                writeln!(self.output, "\nEarbuds marked as found!")?;
                writeln!(
                    self.output,
                    "{}",
                    record.details(&self.config.timestamp_format)
                )?;
            }
            Err(e) if e.is_not_found() => {
                warn!(%id, "selected record vanished from the store");
                writeln!(self.output, "That report is no longer available.")?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }

    fn search(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Search Lost Earbuds ===")?;
        writeln!(self.output, "1. Search by brand/color")?;
        writeln!(self.output, "2. View recent reports")?;
        let Some(line) = self.prompt("Choose search option (1-2): ")? else {
            return Ok(());
        };

        match SearchMenu::parse(&line) {
            Ok(SearchMenu::ByBrandColor) => self.search_by_brand_color(),
            Ok(SearchMenu::Recent) => self.show_recent(),
            Err(Error::InvalidInput { message }) => {
                writeln!(self.output, "{message}")?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    fn search_by_brand_color(&mut self) -> Result<()> {
        let Some(brand) = self.prompt("Enter brand to search (leave blank to skip): ")? else {
            return Ok(());
        };
        let Some(color) = self.prompt("Enter color to search (leave blank to skip): ")? else {
            return Ok(());
        };

        let filter = SearchFilter::new(&brand, &color);
        let results = self.store.search(&filter);

        writeln!(self.output, "\nMatching lost earbuds:")?;
        if results.is_empty() {
            writeln!(self.output, "No matching lost earbuds found.")?;
        }
        for record in results {
            writeln!(
                self.output,
                "{}",
                record.details(&self.config.timestamp_format)
            )?;
        }
        Ok(())
    }

    fn show_recent(&mut self) -> Result<()> {
        writeln!(self.output, "\nMost recent reports:")?;
        let mut shown = 0;
        for record in self.store.most_recent(self.config.recent_limit) {
            writeln!(
                self.output,
                "{}",
                record.details(&self.config.timestamp_format)
            )?;
            shown += 1;
        }
        if shown == 0 {
            writeln!(self.output, "No recent lost earbud reports found.")?;
        }
        Ok(())
    }
}
