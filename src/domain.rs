mod airport_code;
mod city_names;
mod day_range;

pub use airport_code::AirportCode;
pub use city_names::CityNames;
pub use day_range::DayRange;
