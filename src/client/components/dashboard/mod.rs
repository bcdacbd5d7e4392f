pub mod kanban_board;
pub mod kanban_card;
pub mod kanban_column;
pub mod mailbox_icon;
pub mod mailbox_list;
pub mod summary_modal;

pub use kanban_board::KanbanBoard;
pub use kanban_card::KanbanCard;
pub use kanban_column::KanbanColumn;
pub use mailbox_icon::MailboxIconView;
pub use mailbox_list::MailboxList;
pub use summary_modal::EmailSummaryModal;
