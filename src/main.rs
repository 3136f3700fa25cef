fn main() {
    checkmate_web::start();
}
