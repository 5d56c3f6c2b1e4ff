pub mod energy;

pub use energy::EnergyRepository;
