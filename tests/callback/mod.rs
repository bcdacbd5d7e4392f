mod complete_callback;
