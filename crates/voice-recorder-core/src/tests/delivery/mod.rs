mod delivery_router;
