//! One editable list plus two read-only mirrors over the same storage slot.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::controller::{EmployeeList, ListEvent};
use crate::employee::Employee;
use crate::settings::ListSettings;
use crate::storage::EmployeeStore;
use crate::view::{self, ViewMode};

pub struct Dashboard<S: ?Sized> {
    store: Rc<S>,
    main: EmployeeList<Rc<S>>,
    list_mirror: EmployeeList<Rc<S>>,
    table_mirror: EmployeeList<Rc<S>>,
    employees: Vec<Employee>,
    inbox: Rc<RefCell<Vec<ListEvent>>>,
}

impl<S: EmployeeStore + ?Sized> Dashboard<S> {
    pub fn new(store: Rc<S>, settings: ListSettings) -> Self {
        let inbox = Rc::new(RefCell::new(Vec::new()));
        let mut main = EmployeeList::new(store.clone(), settings.clone());
        let sink = inbox.clone();
        main.subscribe(move |event: &ListEvent| sink.borrow_mut().push(event.clone()));

        Self {
            employees: store.load(),
            list_mirror: EmployeeList::mirror(store.clone(), settings.clone(), ViewMode::List),
            table_mirror: EmployeeList::mirror(store.clone(), settings, ViewMode::Table),
            store,
            main,
            inbox,
        }
    }

    /// Runs `action` against the editable list, then brings the mirrors up to
    /// date with whatever it changed.
    pub fn with_main<R>(&mut self, action: impl FnOnce(&mut EmployeeList<Rc<S>>) -> R) -> R {
        let result = action(&mut self.main);
        self.sync();
        result
    }

    /// Reloads the shared snapshot and both mirrors if the main list reported
    /// changes since the last sync. Returns the number of changes consumed.
    pub fn sync(&mut self) -> usize {
        let events: Vec<ListEvent> = self.inbox.borrow_mut().drain(..).collect();
        if events.is_empty() {
            return 0;
        }
        self.refresh();
        debug!(changes = events.len(), "dashboard refreshed");
        events.len()
    }

    /// Unconditionally re-reads storage into the snapshot and every list.
    pub fn refresh(&mut self) {
        self.employees = self.store.load();
        self.main.load();
        self.list_mirror.load();
        self.table_mirror.load();
    }

    pub fn main(&self) -> &EmployeeList<Rc<S>> {
        &self.main
    }

    pub fn list_mirror(&self) -> &EmployeeList<Rc<S>> {
        &self.list_mirror
    }

    pub fn table_mirror(&self) -> &EmployeeList<Rc<S>> {
        &self.table_mirror
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Employee Management Dashboard\n\n");

        out.push_str("== Employee Management ==\n");
        out.push_str(&format!(
            "Employee List ({} employees, view: {})\n\n",
            self.employees.len(),
            self.main.effective_view_mode()
        ));
        out.push_str(&view::render(
            self.main.current_page_slice(),
            self.main.effective_view_mode(),
            true,
        ));
        out.push_str(&view::render_pagination(&self.main.page_controls()));
        out.push_str("\n\n");

        for (title, mirror) in [
            ("List View", &self.list_mirror),
            ("Table View", &self.table_mirror),
        ] {
            out.push_str(&format!("== {title} ==\n"));
            out.push_str(&view::render(
                mirror.current_page_slice(),
                mirror.effective_view_mode(),
                false,
            ));
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::employee::tests::fields;
    use crate::storage::{EmployeeSlot, MemoryKv};

    fn dashboard() -> Dashboard<EmployeeSlot<MemoryKv>> {
        Dashboard::new(
            Rc::new(EmployeeSlot::new(MemoryKv::new(), "employees")),
            ListSettings::default(),
        )
    }

    #[test]
    fn mirrors_follow_main_list_changes() {
        let mut dashboard = dashboard();
        dashboard.with_main(|list| list.create(fields("Ada", "Lovelace"))).unwrap();

        assert_eq!(dashboard.employees().len(), 1);
        assert_eq!(dashboard.list_mirror().employees().len(), 1);
        assert_eq!(dashboard.table_mirror().employees().len(), 1);

        let ada = dashboard.main().employees()[0].clone();
        dashboard.with_main(|list| list.request_delete(&ada));
        assert_eq!(dashboard.list_mirror().employees().len(), 1);
        dashboard.with_main(|list| list.proceed()).unwrap();
        assert!(dashboard.table_mirror().employees().is_empty());
    }

    #[test]
    fn sync_without_changes_is_a_no_op() {
        let mut dashboard = dashboard();
        assert_eq!(dashboard.sync(), 0);
        dashboard.with_main(|list| list.set_page(3));
        assert_eq!(dashboard.sync(), 0);
    }

    #[test]
    fn mirrors_are_locked_to_their_views() {
        let dashboard = dashboard();
        assert_eq!(dashboard.list_mirror().effective_view_mode(), ViewMode::List);
        assert_eq!(dashboard.table_mirror().effective_view_mode(), ViewMode::Table);
        assert!(!dashboard.table_mirror().is_main_list());
    }

    #[test]
    fn render_shows_every_section() {
        let mut dashboard = dashboard();
        dashboard.with_main(|list| list.create(fields("Ada", "Lovelace"))).unwrap();
        let out = dashboard.render();
        assert!(out.starts_with("Employee Management Dashboard\n"));
        assert!(out.contains("Employee List (1 employees, view: list)"));
        assert!(out.contains("== List View =="));
        assert!(out.contains("== Table View =="));
        assert_eq!(out.matches("[edit]").count(), 1);
        assert!(out.contains("(<) [1] (>)"));
    }
}
