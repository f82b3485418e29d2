mod codec;
mod properties;
mod relations;
mod scenarios;

#[ctor::ctor]
fn init() {
    colog::init();
}
