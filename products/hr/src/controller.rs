//! The employee list controller.
//!
//! [`EmployeeList`] holds the collection for one view and is its only writer.
//! Every mutation is written through to the [`EmployeeStore`] before the
//! in-memory copy changes, so a failed write leaves both sides as they were.
//! Unknown ids, out-of-range pages and deletes with nothing staged are
//! ignored rather than reported.

use chrono::Utc;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::confirm::{ConfirmGate, GateSignal};
use crate::employee::{Employee, EmployeeFields, EmployeeId};
use crate::error::HrResult;
use crate::form::{EmployeeForm, FieldMap, Submission};
use crate::pagination::{PageControl, Pagination};
use crate::settings::ListSettings;
use crate::storage::EmployeeStore;
use crate::view::ViewMode;

/// Source of creation timestamps for new ids.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Change notification sent to listeners after every mutation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ListEvent {
    Created(EmployeeId),
    Updated(EmployeeId),
    Deleted(EmployeeId),
}

impl ListEvent {
    pub fn id(&self) -> &EmployeeId {
        match self {
            ListEvent::Created(id) | ListEvent::Updated(id) | ListEvent::Deleted(id) => id,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// A main list edits the collection; a mirror only displays it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ListRole {
    #[default]
    Main,
    Mirror,
}

type Listener = Box<dyn FnMut(&ListEvent)>;

/// Timestamp ids, bumped past the last one issued so that two creates in the
/// same millisecond still get distinct ids. Once the numeric range is used up
/// (a stored id at `i64::MAX`), new ids are random UUIDs instead.
struct IdGenerator {
    clock: Box<dyn Clock>,
    last: i64,
}

impl IdGenerator {
    fn next(&mut self) -> EmployeeId {
        let now = self.clock.now_millis();
        if now > self.last {
            self.last = now;
        } else if let Some(bumped) = self.last.checked_add(1) {
            self.last = bumped;
        } else {
            warn!("numeric employee ids exhausted; issuing a uuid");
            return EmployeeId::new(Uuid::new_v4().to_string());
        }
        EmployeeId::new(self.last.to_string())
    }

    /// Never hand out an id at or below one already in `employees`.
    fn observe(&mut self, employees: &[Employee]) {
        let highest = employees
            .iter()
            .filter_map(|employee| employee.id.as_str().parse::<i64>().ok())
            .max();
        if let Some(highest) = highest {
            self.last = self.last.max(highest);
        }
    }
}

pub struct EmployeeList<S> {
    store: S,
    settings: ListSettings,
    role: ListRole,
    employees: Vec<Employee>,
    pagination: Pagination,
    pending_delete: Option<Employee>,
    view_mode: ViewMode,
    forced_view: Option<ViewMode>,
    gate: ConfirmGate,
    form: EmployeeForm,
    ids: IdGenerator,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: usize,
}

impl<S: EmployeeStore> EmployeeList<S> {
    /// Builds an editable list and loads the collection from `store`.
    pub fn new(store: S, settings: ListSettings) -> Self {
        Self::build(store, settings, ListRole::Main, None, Box::new(SystemClock))
    }

    /// Builds a read-only list locked to `view`.
    pub fn mirror(store: S, settings: ListSettings, view: ViewMode) -> Self {
        Self::build(store, settings, ListRole::Mirror, Some(view), Box::new(SystemClock))
    }

    /// Replaces the clock used for new ids.
    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.ids.clock = Box::new(clock);
        self
    }

    fn build(
        store: S,
        settings: ListSettings,
        role: ListRole,
        forced_view: Option<ViewMode>,
        clock: Box<dyn Clock>,
    ) -> Self {
        let mut list = Self {
            pagination: Pagination::new(settings.page_size),
            store,
            settings,
            role,
            employees: Vec::new(),
            pending_delete: None,
            view_mode: ViewMode::default(),
            forced_view,
            gate: ConfirmGate::new(),
            form: EmployeeForm::new(),
            ids: IdGenerator { clock, last: 0 },
            listeners: Vec::new(),
            next_listener: 0,
        };
        list.load();
        list
    }

    /// Re-reads the collection from storage. Missing or malformed data loads
    /// as an empty collection.
    pub fn load(&mut self) {
        self.employees = self.store.load();
        self.ids.observe(&self.employees);
        self.pagination.resize(self.employees.len());
        debug!(
            count = self.employees.len(),
            total_pages = self.pagination.total_pages(),
            "employee list loaded"
        );
    }

    /// Appends a new record with a fresh id. Returns `None` on a mirror list.
    pub fn create(&mut self, fields: EmployeeFields) -> HrResult<Option<EmployeeId>> {
        if !self.is_editable("create") {
            return Ok(None);
        }
        let id = self.ids.next();
        let mut next = self.employees.clone();
        next.push(fields.into_employee(id.clone()));
        self.commit(next)?;
        info!(id = %id, "employee created");
        self.notify(ListEvent::Created(id.clone()));
        Ok(Some(id))
    }

    /// Replaces the record with `edited.id`, keeping its id and email. Returns
    /// whether a record was replaced.
    pub fn update(&mut self, edited: Employee) -> HrResult<bool> {
        if !self.is_editable("update") {
            return Ok(false);
        }
        let Some(index) = self.position_of(&edited.id) else {
            debug!(id = %edited.id, "update for unknown employee ignored");
            return Ok(false);
        };
        let mut next = self.employees.clone();
        next[index] = self.employees[index].with_edits(&edited);
        self.commit(next)?;
        info!(id = %edited.id, "employee updated");
        self.notify(ListEvent::Updated(edited.id));
        Ok(true)
    }

    /// Stages `employee` for deletion and opens the confirmation gate.
    pub fn request_delete(&mut self, employee: &Employee) {
        if !self.is_editable("delete") {
            return;
        }
        self.gate.show(format!(
            "Selected Employee record of {} {} will be deleted",
            employee.first_name, employee.last_name
        ));
        self.pending_delete = Some(employee.clone());
    }

    /// Removes the staged record and closes the confirmation gate. Returns its
    /// id, or `None` when nothing was staged.
    pub fn confirm_delete(&mut self) -> HrResult<Option<EmployeeId>> {
        let Some(staged) = self.pending_delete.as_ref() else {
            return Ok(None);
        };
        let id = staged.id.clone();
        let next: Vec<Employee> = self
            .employees
            .iter()
            .filter(|employee| employee.id != id)
            .cloned()
            .collect();
        self.commit(next)?;
        self.pending_delete = None;
        self.gate.proceed();
        info!(id = %id, total_pages = self.pagination.total_pages(), "employee deleted");
        self.notify(ListEvent::Deleted(id.clone()));
        Ok(Some(id))
    }

    /// Drops the staged record, if any, and closes the confirmation gate.
    pub fn cancel_delete(&mut self) {
        self.gate.dismiss();
        if let Some(staged) = self.pending_delete.take() {
            debug!(id = %staged.id, "delete cancelled");
        }
    }

    /// Confirmation gate "proceed".
    pub fn proceed(&mut self) -> HrResult<Option<EmployeeId>> {
        match self.gate.proceed() {
            Some(GateSignal::Confirmed) => self.confirm_delete(),
            _ => Ok(None),
        }
    }

    /// Confirmation gate "cancel" or dismiss.
    pub fn dismiss(&mut self) {
        if self.gate.dismiss().is_some() {
            self.cancel_delete();
        }
    }

    pub fn begin_create(&mut self) {
        if self.is_editable("create") {
            self.form.open_for_create();
        }
    }

    /// Opens the form on a detached copy of `employee`.
    pub fn begin_edit(&mut self, employee: &Employee) {
        if self.is_editable("update") {
            self.form.open_for_edit(employee);
        }
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    /// Routes a form submit into `create` or `update`. Returns the id of the
    /// record that changed, if any.
    pub fn submit_form(&mut self, values: &FieldMap) -> HrResult<Option<EmployeeId>> {
        match self.form.submit(values)? {
            Submission::Create(fields) => self.create(fields),
            Submission::Update(edited) => {
                let id = edited.id.clone();
                Ok(self.update(edited)?.then_some(id))
            }
        }
    }

    /// Moves to page `page` if it exists; otherwise nothing changes.
    pub fn set_page(&mut self, page: usize) -> bool {
        let moved = self.pagination.set_page(page);
        if !moved {
            debug!(page, total_pages = self.pagination.total_pages(), "page request ignored");
        }
        moved
    }

    pub fn current_page_slice(&self) -> &[Employee] {
        self.pagination.slice(&self.employees)
    }

    pub fn page_controls(&self) -> Vec<PageControl> {
        self.pagination.controls(self.settings.window_width)
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// The user's selection, regardless of any forced mode.
    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// What is actually displayed: a forced mode wins over the selection.
    pub fn effective_view_mode(&self) -> ViewMode {
        self.forced_view.unwrap_or(self.view_mode)
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&ListEvent) + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener, _)| *listener != id);
        self.listeners.len() != before
    }

    pub fn employees(&self) -> &[Employee] {
        &self.employees
    }

    pub fn find(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|employee| &employee.id == id)
    }

    pub fn current_page(&self) -> usize {
        self.pagination.current_page()
    }

    pub fn total_pages(&self) -> usize {
        self.pagination.total_pages()
    }

    pub fn page_size(&self) -> usize {
        self.pagination.page_size()
    }

    pub fn pending_delete(&self) -> Option<&Employee> {
        self.pending_delete.as_ref()
    }

    pub fn gate(&self) -> &ConfirmGate {
        &self.gate
    }

    pub fn form(&self) -> &EmployeeForm {
        &self.form
    }

    pub fn role(&self) -> ListRole {
        self.role
    }

    pub fn is_main_list(&self) -> bool {
        self.role == ListRole::Main
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    fn is_editable(&self, action: &'static str) -> bool {
        if self.is_main_list() {
            true
        } else {
            debug!(action, "mirror list is read-only");
            false
        }
    }

    fn position_of(&self, id: &EmployeeId) -> Option<usize> {
        self.employees.iter().position(|employee| &employee.id == id)
    }

    /// Persists `next` and only then adopts it.
    fn commit(&mut self, next: Vec<Employee>) -> HrResult<()> {
        self.store.save(&next)?;
        self.employees = next;
        self.pagination.resize(self.employees.len());
        Ok(())
    }

    fn notify(&mut self, event: ListEvent) {
        for (_, listener) in &mut self.listeners {
            listener(&event);
        }
    }
}
