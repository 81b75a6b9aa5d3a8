mod config_flow;
mod verify_window;
