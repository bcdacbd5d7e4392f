mod callback;
mod kanban;
mod session;
