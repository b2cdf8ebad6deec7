/// Gate consulted before an irreversible action such as clearing every order.
pub trait ConfirmationPrompt {
    fn confirm(&self, message: &str) -> bool;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct AlwaysConfirm;

impl ConfirmationPrompt for AlwaysConfirm {
    fn confirm(&self, _message: &str) -> bool {
        true
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NeverConfirm;

impl ConfirmationPrompt for NeverConfirm {
    fn confirm(&self, _message: &str) -> bool {
        false
    }
}

impl<F> ConfirmationPrompt for F
where
    F: Fn(&str) -> bool,
{
    fn confirm(&self, message: &str) -> bool {
        self(message)
    }
}
