//! Découpage `clé=valeur` d'un message view
//!
//! Le `,` sépare à la fois les paires et les éléments d'une liste de valeurs,
//! donc on ne peut pas découper sur `,` d'abord. On découpe sur `=`, puis la
//! clé suivante est récupérée à la fin de la valeur courante (après la
//! dernière virgule). Les deux séparateurs sont cherchés avec `memchr`.
//!
//! Conséquence: une liste en fin de message perd sa dernière composante
//! (`pts=(1,2:3,4)` donne `pts = "(1,2:3"`). Les émetteurs placent donc
//! `pts` avant une autre clé.

use memchr::{memchr_iter, memrchr};
use tracing::debug;

use crate::types::Fields;

/// Décode un message `k1=v1,k2=v2,...` en champs triés par clé
///
/// Ne lève jamais d'erreur. Une clé finale sans valeur (`a=1,b`) est absente
/// du résultat : les champs inconnus ou tronqués sont tolérés.
pub fn parse(text: &str) -> Fields {
    let mut fields = Fields::new();
    let mut parts = split_on_equals(text);

    let Some(first) = parts.next() else {
        return fields;
    };

    let mut key = first;
    let mut dangling = false;

    for part in parts {
        match memrchr(b',', part.as_bytes()) {
            // Un seul morceau: toute la partie est la valeur, la clé est conservée
            None => {
                fields.insert(key.to_string(), part.to_string());
                dangling = false;
            }
            Some(pos) => {
                fields.insert(key.to_string(), part[..pos].to_string());
                key = &part[pos + 1..];
                dangling = true;
            }
        }
    }

    if dangling {
        debug!(key, "trailing view key without value dropped");
    }

    fields
}

/// Morceaux entre les `=` (comme `str::split`, entrée vide comprise)
fn split_on_equals(text: &str) -> impl Iterator<Item = &str> {
    let mut start = 0;
    memchr_iter(b'=', text.as_bytes())
        .chain(std::iter::once(text.len()))
        .map(move |end| {
            let part = &text[start..end];
            start = end + 1;
            part
        })
}
