mod test_ws_session;
