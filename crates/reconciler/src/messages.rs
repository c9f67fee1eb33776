//! User-facing messages recorded by the reconciler.

use core::fmt::Display;

pub const LIST_SAVED: &str = "Boodschappenlijst is opgeslagen.";

pub fn load_failed(err: impl Display) -> String {
    format!("Fout bij laden: {err}")
}

pub fn add_failed(err: impl Display) -> String {
    format!("Fout bij toevoegen: {err}")
}

pub fn increase_failed(err: impl Display) -> String {
    format!("Fout bij verhogen: {err}")
}

pub fn decrease_failed(err: impl Display) -> String {
    format!("Fout bij verlagen: {err}")
}

pub fn remove_failed(err: impl Display) -> String {
    format!("Fout bij verwijderen: {err}")
}

pub fn save_failed(err: impl Display) -> String {
    format!("Opslaan mislukt: {err}")
}
