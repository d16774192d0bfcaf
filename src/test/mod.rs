mod network_integration;
mod packet;
mod router;
