//! HR vertical slice.
//!
//! The [`EmployeeList`] controller owns the employee collection for one view,
//! writes every change through to an [`EmployeeStore`] and keeps pagination,
//! the confirmation gate and the employee form in step with it. Rendering is a
//! set of pure functions in [`view`]; [`Dashboard`] wires one editable list to
//! two read-only mirrors over the same storage slot.

pub mod confirm;
pub mod constraints;
pub mod controller;
pub mod dashboard;
pub mod employee;
pub mod error;
pub mod form;
pub mod pagination;
pub mod settings;
pub mod storage;
pub mod view;

pub use confirm::{ConfirmGate, GateSignal};
pub use controller::{Clock, EmployeeList, ListEvent, ListRole, ListenerId, SystemClock};
pub use dashboard::Dashboard;
pub use employee::{Department, Employee, EmployeeFields, EmployeeId, Position};
pub use error::{FormError, HrError, HrResult, StorageError, StorageResult};
pub use form::{EmployeeForm, FieldMap, FormMode, Submission};
pub use pagination::{PageControl, Pagination};
pub use settings::ListSettings;
pub use storage::{EmployeeSlot, EmployeeStore, FileKv, KeyValueStore, MemoryKv};
pub use view::ViewMode;
