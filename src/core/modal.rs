//! Modal coordinator - the add/edit/delete dialogs of a catalog table
//!
//! Exactly one dialog can be open at a time because the state is a single
//! enum. Forms are built fresh on every open (from defaults for "add",
//! from the target record for "edit") and dropped on close, so nothing
//! leaks from one dialog into the next.

use thiserror::Error;

use crate::core::controller::CrudController;
use crate::core::record::{Draft, Record};
use crate::core::validation::ValidationErrors;

/// Which dialog is showing, without its payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Idle,
    AddOpen,
    EditOpen(u64),
    DeleteConfirmOpen(u64),
}

impl std::fmt::Display for ModalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModalState::Idle => write!(f, "idle"),
            ModalState::AddOpen => write!(f, "add dialog"),
            ModalState::EditOpen(id) => write!(f, "edit dialog for #{}", id),
            ModalState::DeleteConfirmOpen(id) => write!(f, "delete confirmation for #{}", id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModalError {
    #[error("close the {current} first")]
    AlreadyOpen { current: ModalState },

    #[error("no {expected} is open (currently: {current})")]
    WrongState {
        expected: &'static str,
        current: ModalState,
    },

    #[error("no record with id {0}")]
    NoSuchRecord(u64),
}

/// Form values plus the inline errors shown next to them
#[derive(Debug, Clone, Default)]
pub struct Form<D: Draft> {
    pub values: D,
    pub errors: ValidationErrors,
    /// Typed input that did not parse; `values` still holds the old value
    rejected: ValidationErrors,
}

impl<D: Draft> Form<D> {
    fn new(values: D) -> Self {
        Self {
            values,
            errors: ValidationErrors::new(),
            rejected: ValidationErrors::new(),
        }
    }

    /// Errors blocking a save: rejected input first, then the draft's own checks
    fn blocking_errors(&self) -> ValidationErrors {
        let mut errors = self.rejected.clone();
        if let Err(invalid) = self.values.validate() {
            errors.merge(invalid);
        }
        errors
    }
}

#[derive(Debug, Clone)]
enum Modal<R: Record> {
    Idle,
    Add(Form<R::Draft>),
    Edit { target: R, form: Form<R::Draft> },
    DeleteConfirm { target: R },
}

/// What a submit or confirm did
#[derive(Debug, Clone)]
pub enum Submitted<R> {
    /// Saved; the dialog is closed
    Saved(R),
    /// Deleted; the dialog is closed
    Deleted(R),
    /// Validation failed; the dialog stays open with inline errors
    Invalid(ValidationErrors),
    /// The target disappeared meanwhile; the dialog is closed
    Gone,
}

#[derive(Debug, Clone)]
pub struct ModalCoordinator<R: Record> {
    active: Modal<R>,
}

impl<R: Record> Default for ModalCoordinator<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> ModalCoordinator<R> {
    pub fn new() -> Self {
        Self {
            active: Modal::Idle,
        }
    }

    pub fn state(&self) -> ModalState {
        match &self.active {
            Modal::Idle => ModalState::Idle,
            Modal::Add(_) => ModalState::AddOpen,
            Modal::Edit { target, .. } => ModalState::EditOpen(target.id()),
            Modal::DeleteConfirm { target } => ModalState::DeleteConfirmOpen(target.id()),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.active, Modal::Idle)
    }

    /// The open form, if an add or edit dialog is showing
    pub fn form(&self) -> Option<&Form<R::Draft>> {
        match &self.active {
            Modal::Add(form) | Modal::Edit { form, .. } => Some(form),
            _ => None,
        }
    }

    /// The record the open edit/delete dialog is about
    pub fn target(&self) -> Option<&R> {
        match &self.active {
            Modal::Edit { target, .. } | Modal::DeleteConfirm { target } => Some(target),
            _ => None,
        }
    }

    /// "Create" button
    pub fn open_add(&mut self) -> Result<(), ModalError> {
        self.ensure_idle()?;
        self.active = Modal::Add(Form::new(R::Draft::default()));
        Ok(())
    }

    /// A row's "edit" action; the form starts from the record's values
    pub fn open_edit(&mut self, controller: &CrudController<R>, id: u64) -> Result<(), ModalError> {
        self.ensure_idle()?;
        let target = controller.get(id).ok_or(ModalError::NoSuchRecord(id))?.clone();
        let form = Form::new(target.to_draft());
        self.active = Modal::Edit { target, form };
        Ok(())
    }

    /// A row's "delete" action
    pub fn open_delete(&mut self, controller: &CrudController<R>, id: u64) -> Result<(), ModalError> {
        self.ensure_idle()?;
        let target = controller.get(id).ok_or(ModalError::NoSuchRecord(id))?.clone();
        self.active = Modal::DeleteConfirm { target };
        Ok(())
    }

    /// Type into a form field; a bad value is shown inline for that field
    pub fn set_field(&mut self, field: &str, value: &str) -> Result<(), ModalError> {
        let current = self.state();
        let form = match &mut self.active {
            Modal::Add(form) | Modal::Edit { form, .. } => form,
            _ => {
                return Err(ModalError::WrongState {
                    expected: "add or edit dialog",
                    current,
                })
            }
        };

        match form.values.set(field, value) {
            Ok(()) => {
                form.rejected.clear(field);
                form.errors.clear(field);
            }
            Err(e) => {
                form.errors.clear(&e.field);
                form.errors.add(e.clone());
                form.rejected.add(e);
            }
        }
        Ok(())
    }

    /// Submit the add/edit form
    ///
    /// Nothing reaches the controller while any field holds input that did
    /// not parse.
    pub fn submit(&mut self, controller: &mut CrudController<R>) -> Result<Submitted<R>, ModalError> {
        let current = self.state();
        if let Modal::Add(form) | Modal::Edit { form, .. } = &mut self.active {
            if !form.rejected.is_empty() {
                let errors = form.blocking_errors();
                form.errors = errors.clone();
                return Ok(Submitted::Invalid(errors));
            }
        }

        let outcome = match &mut self.active {
            Modal::Add(form) => match controller.add(&form.values) {
                Ok(record) => Submitted::Saved(record),
                Err(errors) => {
                    form.errors = errors.clone();
                    return Ok(Submitted::Invalid(errors));
                }
            },
            Modal::Edit { target, form } => match controller.edit(target.id(), &form.values) {
                Ok(Some(record)) => Submitted::Saved(record),
                Ok(None) => Submitted::Gone,
                Err(errors) => {
                    form.errors = errors.clone();
                    return Ok(Submitted::Invalid(errors));
                }
            },
            _ => {
                return Err(ModalError::WrongState {
                    expected: "add or edit dialog",
                    current,
                })
            }
        };

        self.close();
        Ok(outcome)
    }

    /// "Yes, delete" in the confirmation dialog
    pub fn confirm_delete(&mut self, controller: &mut CrudController<R>) -> Result<Submitted<R>, ModalError> {
        let id = match &self.active {
            Modal::DeleteConfirm { target } => target.id(),
            _ => {
                return Err(ModalError::WrongState {
                    expected: "delete confirmation",
                    current: self.state(),
                })
            }
        };

        let outcome = match controller.delete(id) {
            Some(record) => Submitted::Deleted(record),
            None => Submitted::Gone,
        };
        self.close();
        Ok(outcome)
    }

    /// Cancel / close button: discard the form, touch nothing
    pub fn close(&mut self) {
        self.active = Modal::Idle;
    }

    fn ensure_idle(&self) -> Result<(), ModalError> {
        if self.is_idle() {
            Ok(())
        } else {
            Err(ModalError::AlreadyOpen {
                current: self.state(),
            })
        }
    }
}
