//! Shopping cart store.
//!
//! [`CartStore`] owns the cart, checks every mutation against live stock,
//! persists the full snapshot after each successful change, and reports one
//! notification per call.

mod store;

pub use store::{CartServices, CartStore};

/// User-facing messages (pt-BR storefront).
pub mod messages {
    pub const ADD_SUCCESS: &str = "Produto adicionado ao carrinho";
    pub const ADD_FAILURE: &str = "Erro na adição do produto";
    pub const REMOVE_SUCCESS: &str = "Produto removido do carrinho";
    pub const REMOVE_FAILURE: &str = "Erro na remoção do produto";
    pub const UPDATE_SUCCESS: &str = "Quantidade do produto atualizada";
    pub const UPDATE_FAILURE: &str = "Erro na alteração de quantidade do produto";
    pub const OUT_OF_STOCK: &str = "Quantidade solicitada fora de estoque";
}

/// The three cart mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Remove,
    UpdateAmount,
}

impl Operation {
    #[must_use]
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Add => messages::ADD_SUCCESS,
            Self::Remove => messages::REMOVE_SUCCESS,
            Self::UpdateAmount => messages::UPDATE_SUCCESS,
        }
    }

    /// Generic failure shown for anything but a stock shortage.
    #[must_use]
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::Add => messages::ADD_FAILURE,
            Self::Remove => messages::REMOVE_FAILURE,
            Self::UpdateAmount => messages::UPDATE_FAILURE,
        }
    }
}

/// What a cart operation did, mirroring the notification it emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// The cart changed and was persisted.
    Success,
    /// Stock could not cover the request; the cart is unchanged.
    OutOfStock,
    /// Any other failure; the cart is unchanged.
    Failed,
}

impl Outcome {
    #[must_use]
    pub const fn is_success(self) -> bool {
        matches!(self, Self::Success)
    }
}
