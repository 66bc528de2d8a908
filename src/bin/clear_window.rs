use starting_gl::{app, Lesson};

fn main() {
    std::process::exit(app::launch(Lesson::Clear));
}
