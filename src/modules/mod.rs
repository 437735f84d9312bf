pub mod image;

pub mod health {
    pub mod handle;
    pub mod route;
}

pub mod ui {
    pub mod handle;
    pub mod route;
}
