pub(crate) mod player;
