use crate::modules::image::handle::*;
use actix_web::web::ServiceConfig;

pub fn configure(cfg: &mut ServiceConfig) {
    cfg.service(upload_image).service(list_images).service(get_image).service(delete_image);
}
