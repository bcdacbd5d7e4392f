use std::{future::Future, pin::Pin, rc::Rc};

use crate::client::error::ClientError;

pub type ActionFuture = Pin<Box<dyn Future<Output = Result<(), ClientError>>>>;

/// An asynchronous callback passed down as a component prop
///
/// Components await the returned future to know whether the parent's operation succeeded.
/// Two actions are equal only when they share the same closure.
pub struct AsyncAction<Args>(Rc<dyn Fn(Args) -> ActionFuture>);

impl<Args: 'static> AsyncAction<Args> {
    pub fn new<F, Fut>(action: F) -> Self
    where
        F: Fn(Args) -> Fut + 'static,
        Fut: Future<Output = Result<(), ClientError>> + 'static,
    {
        Self(Rc::new(move |args| Box::pin(action(args)) as ActionFuture))
    }

    pub fn call(&self, args: Args) -> ActionFuture {
        (self.0)(args)
    }
}

impl<Args> Clone for AsyncAction<Args> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<Args> PartialEq for AsyncAction<Args> {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
