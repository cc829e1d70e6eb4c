use std::io::{self, BufRead, Write};
use tracing::debug;

use crate::catalog::COURSE_CATALOG;
use crate::db::CourseStore;
use crate::models::{CatalogEntry, NewCourse};
use crate::services::course_service::{confirms_delete, CourseService, DELETE_CONFIRMATION};

pub const MENU_TITLE: &str = "=== Marnona Firebase Course Manager ===";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    ListCourses,
    AddCourse,
    PopulateAll,
    DeleteAll,
    Exit,
}

impl MenuState {
    /// State selected by a main-menu answer, `None` for anything else
    pub fn from_choice(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuState::ListCourses),
            "2" => Some(MenuState::AddCourse),
            "3" => Some(MenuState::PopulateAll),
            "4" => Some(MenuState::DeleteAll),
            "5" => Some(MenuState::Exit),
            _ => None,
        }
    }
}

/// Interactive loop over an operator's input and output streams.
///
/// Every operation returns to the main menu; only `5` or the end of input
/// leaves the loop. Database failures are printed and never end the loop.
pub struct CourseMenu<'a, S, R, W>
where
    S: CourseStore + ?Sized,
{
    service: CourseService<'a, S>,
    catalog: &'a [CatalogEntry],
    input: R,
    output: W,
}

impl<'a, S, R, W> CourseMenu<'a, S, R, W>
where
    S: CourseStore + ?Sized,
    R: BufRead,
    W: Write,
{
    pub fn new(store: &'a S, input: R, output: W) -> Self {
        Self {
            service: CourseService::new(store),
            catalog: COURSE_CATALOG,
            input,
            output,
        }
    }

    pub fn with_catalog(mut self, catalog: &'a [CatalogEntry]) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn with_service(mut self, service: CourseService<'a, S>) -> Self {
        self.service = service;
        self
    }

    pub fn into_output(self) -> W {
        self.output
    }

    pub async fn run(&mut self) -> io::Result<()> {
        let mut state = MenuState::MainMenu;
        loop {
            debug!("Menu state: {:?}", state);
            state = match state {
                MenuState::MainMenu => self.main_menu()?,
                MenuState::ListCourses => {
                    self.list_courses().await?;
                    MenuState::MainMenu
                }
                MenuState::AddCourse => {
                    self.add_course().await?;
                    MenuState::MainMenu
                }
                MenuState::PopulateAll => {
                    self.populate_all().await?;
                    MenuState::MainMenu
                }
                MenuState::DeleteAll => {
                    self.delete_all().await?;
                    MenuState::MainMenu
                }
                MenuState::Exit => {
                    writeln!(self.output, "Exiting program.")?;
                    self.output.flush()?;
                    return Ok(());
                }
            };
        }
    }

    fn main_menu(&mut self) -> io::Result<MenuState> {
        writeln!(self.output, "\n{}", MENU_TITLE)?;
        writeln!(self.output, "1. List all courses")?;
        writeln!(self.output, "2. Add a new course")?;
        writeln!(self.output, "3. Populate database with all predefined courses")?;
        writeln!(self.output, "4. Delete all courses")?;
        writeln!(self.output, "5. Exit")?;

        let Some(choice) = self.prompt("\nEnter your choice (1-5): ")? else {
            writeln!(self.output)?;
            return Ok(MenuState::Exit);
        };

        match MenuState::from_choice(&choice) {
            Some(next) => Ok(next),
            None => {
                writeln!(self.output, "Invalid choice. Please try again.")?;
                Ok(MenuState::MainMenu)
            }
        }
    }

    /// Print `message`, read one line. `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        let answer = line.strip_suffix('\n').unwrap_or(&line);
        let answer = answer.strip_suffix('\r').unwrap_or(answer);
        Ok(Some(answer.to_string()))
    }

    async fn list_courses(&mut self) -> io::Result<()> {
        match self.service.list_courses().await {
            Ok(courses) if courses.is_empty() => writeln!(self.output, "No courses found."),
            Ok(courses) => {
                writeln!(self.output, "\n=== Courses List ===")?;
                for course in &courses {
                    writeln!(self.output, "{}", course.summary_line())?;
                }
                Ok(())
            }
            Err(e) => writeln!(self.output, "Error listing courses: {}", e),
        }
    }

    async fn add_course(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== Add New Course ===")?;
        let Some(code) = self.prompt("Enter course code: ")? else { return Ok(()) };
        let Some(name) = self.prompt("Enter course name: ")? else { return Ok(()) };
        let Some(description) = self.prompt("Enter course description (or press Enter for default): ")? else {
            return Ok(());
        };
        let Some(category) = self.prompt("Enter course category (or press Enter for auto-generation): ")? else {
            return Ok(());
        };

        let (code, name) = (code.trim(), name.trim());
        if code.is_empty() || name.is_empty() {
            return writeln!(self.output, "Course code and name are required.");
        }

        let course = NewCourse::with_overrides(code, name, Some(description.trim()), Some(category.trim()));
        match self.service.add_course(&course).await {
            Ok(id) => writeln!(self.output, "Successfully added course: {} with ID: {}", course.name, id),
            Err(e) => writeln!(self.output, "Error adding course {} ({}): {}", course.name, course.code, e),
        }
    }

    async fn populate_all(&mut self) -> io::Result<()> {
        writeln!(self.output, "Populating database with courses...")?;

        let existing = match self.service.existing_course_count().await {
            Ok(count) => count,
            Err(e) => return writeln!(self.output, "Error checking existing courses: {}", e),
        };

        if existing > 0 {
            writeln!(self.output, "Warning: {} courses already exist in the database.", existing)?;
            let answer = self.prompt("Do you want to continue and possibly add duplicates? (y/n): ")?;
            if !answer.is_some_and(|a| a.to_lowercase() == "y") {
                return writeln!(self.output, "Operation canceled.");
            }
        }

        let report = self.service.populate(self.catalog).await;
        for course in &report.inserted {
            writeln!(self.output, "Added course: {} with ID: {}", course.name, course.id)?;
        }
        for failure in &report.failures {
            writeln!(
                self.output,
                "Error adding course {} ({}): {}",
                failure.name, failure.code, failure.error
            )?;
        }

        if report.is_complete() {
            writeln!(self.output, "All courses added successfully!")
        } else {
            writeln!(
                self.output,
                "Added {} of {} courses; {} failed.",
                report.inserted.len(),
                report.attempted(),
                report.failures.len()
            )
        }
    }

    async fn delete_all(&mut self) -> io::Result<()> {
        let message = format!(
            "WARNING: This will delete ALL courses. Type '{}' to confirm: ",
            DELETE_CONFIRMATION
        );
        let confirmed = self.prompt(&message)?.is_some_and(|a| confirms_delete(&a));
        if !confirmed {
            return writeln!(self.output, "Operation canceled.");
        }

        let report = match self.service.delete_batch().await {
            Ok(report) => report,
            Err(e) => return writeln!(self.output, "Error deleting courses: {}", e),
        };

        for failure in &report.failures {
            writeln!(self.output, "Error deleting course {}: {}", failure.id, failure.error)?;
        }

        if report.limit_reached {
            writeln!(
                self.output,
                "Deleted {} documents. There might be more remaining.",
                report.deleted
            )
        } else if report.failures.is_empty() {
            writeln!(self.output, "Successfully deleted all {} courses.", report.deleted)
        } else {
            writeln!(
                self.output,
                "Deleted {} courses; {} could not be deleted.",
                report.deleted,
                report.failures.len()
            )
        }
    }
}
