pub mod map;
pub mod navigation;
pub mod popup;

pub use map::WorldMap;
pub use navigation::NavigationControl;
pub use popup::CountryPopup;
