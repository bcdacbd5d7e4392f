#![allow(non_snake_case)]

use aiemail::client::App;

fn main() {
    dioxus::launch(App);
}
