fn main() {
    // Emits the ESP-IDF link/env directives when cross-building for the
    // device; a no-op on host targets.
    embuild::espidf::sysenv::output();
}
