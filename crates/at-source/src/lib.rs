/// Chargement des images sources pour asciitone.

pub mod image;
