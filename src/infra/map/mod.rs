pub mod leaflet;
#[cfg(test)]
pub mod recording;
