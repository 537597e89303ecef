pub mod chat_panel;
pub mod contact;
pub mod credentials;
pub mod hero;
pub mod input_box;
pub mod journey;
pub mod message;
pub mod projects;
pub mod ticker;
pub mod title_bar;

pub use chat_panel::{ChatPanel, ChatPanelState};
pub use contact::ContactPanel;
pub use credentials::Credentials;
pub use hero::Hero;
pub use input_box::{InputBox, InputEvent};
pub use journey::{JourneyLayout, JourneyView};
pub use projects::{ProjectDetail, ProjectsEvent, ProjectsGrid, ProjectsState};
pub use ticker::TechTicker;
pub use title_bar::TitleBar;
