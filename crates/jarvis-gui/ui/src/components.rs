mod filter_bar;
mod task_card;
mod task_detail;
mod task_form;
mod task_grid;

pub use filter_bar::FilterBar;
pub use task_card::TaskCard;
pub use task_detail::TaskDetail;
pub use task_form::TaskForm;
pub use task_grid::TaskGrid;
