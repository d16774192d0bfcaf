pub mod demo;
pub mod net;
pub mod rip;
pub mod scenario;
pub mod sim;
pub mod topo;
pub mod trace;

#[cfg(test)]
mod test;
