//! Completion callbacks handed to dialogs.
//!
//! A dialog collects input, awaits the callback and closes only on `Ok`.
//! `Err` carries the message the dialog shows inline.

use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;

pub type SubmitFuture = Pin<Box<dyn Future<Output = Result<(), String>>>>;

pub type OnSubmit<T> = Rc<dyn Fn(T) -> SubmitFuture>;

/// Wraps an async closure as an `OnSubmit`.
pub fn on_submit<T, F, Fut>(f: F) -> OnSubmit<T>
where
    F: Fn(T) -> Fut + 'static,
    Fut: Future<Output = Result<(), String>> + 'static,
{
    Rc::new(move |value| Box::pin(f(value)))
}
