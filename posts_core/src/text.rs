//! Frontière texte brut / texte échappé.
//!
//! Tout champ saisi par un utilisateur passe par [`SafeText::escape`] avant
//! d'être injecté dans du balisage. Seuls `<` et `>` sont réécrits : c'est ce
//! que fait le front « durci » avant l'envoi, et un texte déjà échappé
//! (`&lt;b&gt;`) ressort donc inchangé.

use std::fmt;

use serde::Serialize;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeText(String);

impl SafeText {
    pub fn escape(raw: &str) -> Self {
        Self(raw.replace('<', "&lt;").replace('>', "&gt;"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    /// Texte tel qu'il s'affiche, pour pré-remplir un champ de saisie.
    /// Ne décode que `&lt;` et `&gt;`, les seules entités produites ici.
    pub fn to_plain(&self) -> String {
        self.0.replace("&lt;", "<").replace("&gt;", ">")
    }
}

impl fmt::Display for SafeText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
