mod cross_tab;
mod restore;
mod token;
